#![cfg_attr(not(test), no_std)]

//! Board glue for the Morse tutor on top of `embedded-hal` traits: a
//! debounced key and the buzzer/LED indicator panel.

pub mod input;
pub mod output;
