//! Stdin key script.
//!
//! One entry per line, `#` starts a comment:
//!
//! ```text
//! 120        # press held 120 ms, as soon as the tutor listens
//! down 5000  # raw key down at t = 5000 ms
//! up 5450    # raw key up at t = 5450 ms
//! key .-.    # one hold per symbol, on either side of the dash threshold
//! quit
//! ```

use std::fmt;

use morse_core::codebook::{self, Sequence, Symbol};

/// Pause the virtual learner leaves between scripted holds.
const PAUSE_MS: u64 = 150;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum ScriptLine {
    Blank,
    Quit,
    Hold(u64),
    Down(u64),
    Up(u64),
    Keys(Sequence),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum ParseError {
    UnknownCommand(String),
    MissingTime(&'static str),
    BadTime(String),
    BadPattern(String),
    TrailingInput(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(word) => write!(f, "unknown entry {word:?}"),
            Self::MissingTime(command) => write!(f, "`{command}` needs a time in ms"),
            Self::BadTime(word) => write!(f, "{word:?} is not a time in ms"),
            Self::BadPattern(word) => write!(f, "{word:?} is not a dot/dash pattern"),
            Self::TrailingInput(word) => write!(f, "unexpected {word:?} at end of line"),
        }
    }
}

pub(super) fn parse_line(line: &str) -> Result<ScriptLine, ParseError> {
    let content = line.split('#').next().unwrap_or_default();
    let mut words = content.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(ScriptLine::Blank);
    };

    let entry = match first.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => ScriptLine::Quit,
        "down" => ScriptLine::Down(parse_time("down", words.next())?),
        "up" => ScriptLine::Up(parse_time("up", words.next())?),
        "key" => ScriptLine::Keys(parse_keys(words.next())?),
        _ => ScriptLine::Hold(
            first
                .parse()
                .map_err(|_| ParseError::UnknownCommand(first.to_string()))?,
        ),
    };

    if let Some(extra) = words.next() {
        return Err(ParseError::TrailingInput(extra.to_string()));
    }
    Ok(entry)
}

fn parse_time(command: &'static str, word: Option<&str>) -> Result<u64, ParseError> {
    let word = word.ok_or(ParseError::MissingTime(command))?;
    word.parse()
        .map_err(|_| ParseError::BadTime(word.to_string()))
}

fn parse_keys(word: Option<&str>) -> Result<Sequence, ParseError> {
    let word = word.unwrap_or_default();
    match codebook::parse_pattern(word) {
        Some(pattern) if !pattern.is_empty() => Ok(pattern),
        _ => Err(ParseError::BadPattern(word.to_string())),
    }
}

/// Hold length that classifies as `symbol` under `dash_threshold_ms`.
pub(super) fn hold_for(symbol: Symbol, dash_threshold_ms: u32) -> u64 {
    let threshold = u64::from(dash_threshold_ms);
    match symbol {
        Symbol::Dot => threshold / 2,
        Symbol::Dash => threshold + threshold / 2,
    }
}

/// Virtual clock for scripted presses.
#[derive(Debug, Default)]
pub(super) struct VirtualKey {
    clock_ms: u64,
}

impl VirtualKey {
    pub(super) const fn new() -> Self {
        Self { clock_ms: 0 }
    }

    /// Press/release times for a hold that starts once the tutor listens.
    pub(super) fn hold(&mut self, held_ms: u64, listening_from_ms: u64) -> (u64, u64) {
        let pressed_at = self.clock_ms.max(listening_from_ms);
        let released_at = pressed_at.saturating_add(held_ms);
        self.clock_ms = released_at.saturating_add(PAUSE_MS);
        (pressed_at, released_at)
    }

    /// Raw events keep their own time; later holds start after them.
    pub(super) fn stamp(&mut self, at_ms: u64) -> u64 {
        self.clock_ms = self.clock_ms.max(at_ms);
        at_ms
    }
}
