//! Input abstraction layer.

pub mod mock;

/// Key state changes reported by the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Press,
    Release,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
