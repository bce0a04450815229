//! Tutor configuration.
//!
//! The dash threshold only affects how presses are read; [`PlaybackTiming`]
//! only affects how questions and feedback are played. Neither is derived
//! from the other.

use crate::codebook::Symbol;
use crate::judge::Outcome;
use crate::output::INDICATOR_COUNT;

/// Durations used by output sinks when playing sequences and feedback.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackTiming {
    pub dot_ms: u32,
    pub dash_ms: u32,
    /// Silence after every symbol.
    pub symbol_gap_ms: u32,
    /// Silence after the whole letter.
    pub letter_gap_ms: u32,
    /// Period of one indicator step in success/reset animations.
    pub feedback_step_ms: u32,
    pub reset_blinks: u8,
}

impl PlaybackTiming {
    pub const fn new() -> Self {
        Self {
            dot_ms: 200,
            dash_ms: 600,
            symbol_gap_ms: 200,
            letter_gap_ms: 400,
            feedback_step_ms: 200,
            reset_blinks: 5,
        }
    }

    pub const fn with_dot_ms(mut self, dot_ms: u32) -> Self {
        self.dot_ms = dot_ms;
        self
    }

    pub const fn with_dash_ms(mut self, dash_ms: u32) -> Self {
        self.dash_ms = dash_ms;
        self
    }

    pub const fn with_symbol_gap_ms(mut self, symbol_gap_ms: u32) -> Self {
        self.symbol_gap_ms = symbol_gap_ms;
        self
    }

    pub const fn with_letter_gap_ms(mut self, letter_gap_ms: u32) -> Self {
        self.letter_gap_ms = letter_gap_ms;
        self
    }

    pub const fn with_feedback_step_ms(mut self, feedback_step_ms: u32) -> Self {
        self.feedback_step_ms = feedback_step_ms;
        self
    }

    pub const fn with_reset_blinks(mut self, reset_blinks: u8) -> Self {
        self.reset_blinks = reset_blinks;
        self
    }

    pub const fn symbol_ms(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::Dot => self.dot_ms,
            Symbol::Dash => self.dash_ms,
        }
    }

    /// Time a sink blocks while transmitting `symbols`.
    pub fn transmit_ms(&self, symbols: &[Symbol]) -> u64 {
        let keyed: u64 = symbols
            .iter()
            .map(|symbol| self.symbol_ms(*symbol) as u64 + self.symbol_gap_ms as u64)
            .sum();
        keyed + self.letter_gap_ms as u64
    }

    /// Time a sink blocks while signalling `outcome`.
    pub const fn feedback_ms(&self, outcome: Outcome) -> u64 {
        let step = self.feedback_step_ms as u64;
        match outcome {
            // Every indicator on, then every indicator off.
            Outcome::Success => 2 * INDICATOR_COUNT as u64 * step,
            Outcome::Wrong { .. } => 0,
            Outcome::Reset => 2 * self.reset_blinks as u64 * step,
        }
    }
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// What happens to presses that arrive while the sink is still playing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BusyInputPolicy {
    /// Ignore events stamped before the sink finished.
    #[default]
    Drop,
    /// Classify every event as it arrives.
    Accept,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TutorConfig {
    /// Presses at least this long read as a dash.
    pub dash_threshold_ms: u32,
    pub playback: PlaybackTiming,
    pub busy_input: BusyInputPolicy,
}

impl TutorConfig {
    pub const fn new() -> Self {
        Self {
            dash_threshold_ms: 400,
            playback: PlaybackTiming::new(),
            busy_input: BusyInputPolicy::Drop,
        }
    }

    pub const fn with_dash_threshold_ms(mut self, dash_threshold_ms: u32) -> Self {
        self.dash_threshold_ms = dash_threshold_ms;
        self
    }

    pub const fn with_playback(mut self, playback: PlaybackTiming) -> Self {
        self.playback = playback;
        self
    }

    pub const fn with_busy_input(mut self, busy_input: BusyInputPolicy) -> Self {
        self.busy_input = busy_input;
        self
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self::new()
    }
}
