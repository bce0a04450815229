//! Round state and the decision table applied to a completed attempt.

use crate::{attempt::Attempt, codebook::Symbol, question::Question};

/// Wrong answers tolerated on one target; the next wrong answer resets.
pub const MAX_FAILURES: u8 = 3;

/// Feedback the judge asks the output sink to show.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    /// `index` is the failure count before this answer and selects which
    /// indicator lights up.
    Wrong { index: u8 },
    Reset,
}

/// What the round does after feedback.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NextStep {
    /// Draw a new question.
    Advance,
    /// Replay the same target and wait for another attempt.
    Repeat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Judgement {
    pub outcome: Outcome,
    pub next: NextStep,
}

/// One target letter with its attempt and failure count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    question: Question,
    attempt: Attempt,
    failures: u8,
}

impl Round {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            attempt: Attempt::new(question.symbols.len()),
            failures: 0,
        }
    }

    pub const fn question(&self) -> &Question {
        &self.question
    }

    pub const fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    /// Consecutive wrong answers on this target, always `0..=MAX_FAILURES`.
    pub const fn failures(&self) -> u8 {
        self.failures
    }

    /// Adds a keyed symbol; returns `true` when this symbol completed the
    /// attempt. A symbol offered to an already complete attempt is refused
    /// and returns `false`.
    pub fn record(&mut self, symbol: Symbol) -> bool {
        self.attempt.append(symbol) && self.attempt.is_complete()
    }

    /// Decision table for the completed attempt. Leaves the round untouched.
    ///
    /// | attempt        | failures | outcome           | next    |
    /// |----------------|----------|-------------------|---------|
    /// | equals target  | any      | `Success`         | advance |
    /// | differs        | < 3      | `Wrong{failures}` | repeat  |
    /// | differs        | 3        | `Reset`           | advance |
    pub fn assess(&self) -> Judgement {
        if self.attempt.as_slice() == self.question.symbols {
            Judgement {
                outcome: Outcome::Success,
                next: NextStep::Advance,
            }
        } else if self.failures < MAX_FAILURES {
            Judgement {
                outcome: Outcome::Wrong {
                    index: self.failures,
                },
                next: NextStep::Repeat,
            }
        } else {
            Judgement {
                outcome: Outcome::Reset,
                next: NextStep::Advance,
            }
        }
    }

    /// Applies a judgement from [`Round::assess`]: updates the failure count
    /// and clears the attempt.
    pub fn commit(&mut self, judgement: Judgement) {
        self.failures = match judgement.outcome {
            Outcome::Success | Outcome::Reset => 0,
            Outcome::Wrong { index } => (index + 1).min(MAX_FAILURES),
        };
        self.attempt.reset();
    }

    /// Assesses and commits in one step.
    pub fn judge(&mut self) -> Judgement {
        let judgement = self.assess();
        self.commit(judgement);
        judgement
    }

    /// Throws the keyed symbols away without judging them.
    pub fn discard_attempt(&mut self) {
        self.attempt.reset();
    }
}
