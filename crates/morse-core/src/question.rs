//! Question sources: pick the next target letter.

use core::fmt;

use rand::{Rng, RngCore};

use crate::codebook::{self, ALPHABET, Symbol, UnknownCharacter};

/// Target letter and its encoded sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Question {
    pub character: char,
    pub symbols: &'static [Symbol],
}

impl Question {
    pub fn for_character(character: char) -> Result<Self, UnknownCharacter> {
        Ok(Self {
            character,
            symbols: codebook::encode(character)?,
        })
    }
}

/// Supplies the next question of a session.
pub trait QuestionSource {
    fn next_question(&mut self) -> Result<Question, UnknownCharacter>;
}

/// Uniform, independent choice over [`ALPHABET`]. The previous letter may
/// come up again.
#[derive(Debug)]
pub struct RandomQuestions<R> {
    rng: R,
}

impl<R: RngCore> RandomQuestions<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> QuestionSource for RandomQuestions<R> {
    fn next_question(&mut self) -> Result<Question, UnknownCharacter> {
        let index = self.rng.gen_range(0..ALPHABET.len());
        Question::for_character(ALPHABET[index])
    }
}

/// Drill list rejected by [`ScriptedQuestions::new`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrillListError {
    Empty,
    Unsupported(UnknownCharacter),
}

impl From<UnknownCharacter> for DrillListError {
    fn from(err: UnknownCharacter) -> Self {
        Self::Unsupported(err)
    }
}

impl fmt::Display for DrillListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("drill list is empty"),
            Self::Unsupported(err) => write!(f, "{err}"),
        }
    }
}

/// Cycles through a fixed drill list.
#[derive(Debug, Clone)]
pub struct ScriptedQuestions<'a> {
    letters: &'a [char],
    cursor: usize,
}

impl<'a> ScriptedQuestions<'a> {
    /// Fails on an empty list or the first unsupported letter.
    pub fn new(letters: &'a [char]) -> Result<Self, DrillListError> {
        if letters.is_empty() {
            return Err(DrillListError::Empty);
        }
        for &letter in letters {
            codebook::encode(letter)?;
        }

        Ok(Self { letters, cursor: 0 })
    }
}

impl QuestionSource for ScriptedQuestions<'_> {
    fn next_question(&mut self) -> Result<Question, UnknownCharacter> {
        let character = self.letters[self.cursor % self.letters.len()];
        self.cursor = self.cursor.wrapping_add(1);
        Question::for_character(character)
    }
}
