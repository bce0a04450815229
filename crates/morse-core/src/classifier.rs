//! Press classification: one press/release interval becomes one symbol.

use log::debug;

use crate::codebook::Symbol;

/// `Dot` below `dash_threshold_ms`, `Dash` at or above it.
pub const fn classify(duration_ms: u64, dash_threshold_ms: u32) -> Symbol {
    if duration_ms < dash_threshold_ms as u64 {
        Symbol::Dot
    } else {
        Symbol::Dash
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PressState {
    Idle,
    Pressed { since_ms: u64 },
}

/// Two-state press tracker. Repeated presses and stray releases are ignored,
/// so switch bounce never produces extra symbols. A press stays open until
/// released; there is no timeout.
#[derive(Clone, Copy, Debug)]
pub struct PressTracker {
    state: PressState,
    dash_threshold_ms: u32,
}

impl PressTracker {
    pub const fn new(dash_threshold_ms: u32) -> Self {
        Self {
            state: PressState::Idle,
            dash_threshold_ms,
        }
    }

    pub const fn state(&self) -> PressState {
        self.state
    }

    pub const fn dash_threshold_ms(&self) -> u32 {
        self.dash_threshold_ms
    }

    /// Returns `true` when the press opened a new interval.
    pub fn on_press(&mut self, now_ms: u64) -> bool {
        match self.state {
            PressState::Idle => {
                self.state = PressState::Pressed { since_ms: now_ms };
                true
            }
            PressState::Pressed { since_ms } => {
                debug!("press at {now_ms} ignored, already pressed since {since_ms}");
                false
            }
        }
    }

    /// Closes the open interval and classifies it.
    pub fn on_release(&mut self, now_ms: u64) -> Option<Symbol> {
        let PressState::Pressed { since_ms } = self.state else {
            debug!("release at {now_ms} ignored, no press in progress");
            return None;
        };

        self.state = PressState::Idle;
        let held_ms = now_ms.saturating_sub(since_ms);
        Some(classify(held_ms, self.dash_threshold_ms))
    }

    /// Forget any open press.
    pub fn discard(&mut self) {
        self.state = PressState::Idle;
    }
}
