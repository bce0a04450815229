//! Output abstraction layer.

use crate::{codebook::Symbol, judge::Outcome, settings::PlaybackTiming};

/// Feedback indicators on the board. Wrong answers light indicators
/// `0..MAX_FAILURES`; success and reset animate all of them.
pub const INDICATOR_COUNT: usize = 4;

/// Blocking sound/light output driven by the tutor.
///
/// Both calls return only when the output has finished, taking the time
/// [`PlaybackTiming::transmit_ms`] / [`PlaybackTiming::feedback_ms`] report.
pub trait OutputSink {
    type Error;

    fn transmit(&mut self, symbols: &[Symbol], timing: &PlaybackTiming) -> Result<(), Self::Error>;

    fn signal_outcome(
        &mut self,
        outcome: Outcome,
        timing: &PlaybackTiming,
    ) -> Result<(), Self::Error>;
}
