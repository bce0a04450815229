#![cfg_attr(not(test), no_std)]

//! Hardware-agnostic Morse tutor: codebook, press classification, attempt
//! tracking and the judge that drives question rounds.
//!
//! Board crates feed press/release events in and realise [`output::OutputSink`]
//! for the buzzer and indicator lights.

pub mod attempt;
pub mod classifier;
pub mod codebook;
pub mod input;
pub mod judge;
pub mod output;
pub mod question;
pub mod settings;
pub mod tutor;
