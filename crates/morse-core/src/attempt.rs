//! Learner's in-progress answer.

use crate::codebook::{MAX_SYMBOLS, Sequence, Symbol};

/// Symbols keyed so far against a target of fixed length.
///
/// Completion is decided by length only: the attempt is complete as soon as
/// it is as long as the target, whatever its content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attempt {
    target_len: usize,
    symbols: Sequence,
}

impl Attempt {
    pub fn new(target_len: usize) -> Self {
        Self {
            target_len: target_len.min(MAX_SYMBOLS),
            symbols: Sequence::new(),
        }
    }

    /// Appends a symbol. Returns `false` and leaves the attempt untouched
    /// once it is already complete.
    pub fn append(&mut self, symbol: Symbol) -> bool {
        if self.is_complete() {
            return false;
        }
        self.symbols.push(symbol).is_ok()
    }

    pub fn is_complete(&self) -> bool {
        self.symbols.len() == self.target_len
    }

    pub fn reset(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub const fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }
}
