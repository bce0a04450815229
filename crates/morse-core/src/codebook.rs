//! International Morse table for the letters A-Z.

use core::fmt;

use heapless::Vec;

/// Longest letter sequence in the table.
pub const MAX_SYMBOLS: usize = 4;

/// Owned symbol sequence, sized for any supported letter.
pub type Sequence = Vec<Symbol, MAX_SYMBOLS>;

/// One keyed element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Dash => '-',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Dot),
            '-' => Some(Self::Dash),
            _ => None,
        }
    }
}

/// Character outside the supported set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownCharacter(pub char);

impl fmt::Display for UnknownCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no Morse sequence for {:?}", self.0)
    }
}

/// Supported characters in table order.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

const D: Symbol = Symbol::Dot;
const T: Symbol = Symbol::Dash;

const TABLE: [&[Symbol]; 26] = [
    &[D, T],       // A
    &[T, D, D, D], // B
    &[T, D, T, D], // C
    &[T, D, D],    // D
    &[D],          // E
    &[D, D, T, D], // F
    &[T, T, D],    // G
    &[D, D, D, D], // H
    &[D, D],       // I
    &[D, T, T, T], // J
    &[T, D, T],    // K
    &[D, T, D, D], // L
    &[T, T],       // M
    &[T, D],       // N
    &[T, T, T],    // O
    &[D, T, T, D], // P
    &[T, T, D, T], // Q
    &[D, T, D],    // R
    &[D, D, D],    // S
    &[T],          // T
    &[D, D, T],    // U
    &[D, D, D, T], // V
    &[D, T, T],    // W
    &[T, D, D, T], // X
    &[T, D, T, T], // Y
    &[T, T, D, D], // Z
];

/// Symbol sequence for an uppercase letter.
pub fn encode(ch: char) -> Result<&'static [Symbol], UnknownCharacter> {
    if !ch.is_ascii_uppercase() {
        return Err(UnknownCharacter(ch));
    }

    Ok(TABLE[(ch as u8 - b'A') as usize])
}

/// Letter whose sequence equals `symbols` exactly.
pub fn decode(symbols: &[Symbol]) -> Option<char> {
    TABLE
        .iter()
        .position(|entry| *entry == symbols)
        .map(|index| ALPHABET[index])
}

/// Parse dot/dash text such as `".-"`. Rejects other characters and
/// sequences longer than [`MAX_SYMBOLS`].
pub fn parse_pattern(text: &str) -> Option<Sequence> {
    let mut out = Sequence::new();
    for ch in text.chars() {
        out.push(Symbol::from_char(ch)?).ok()?;
    }
    Some(out)
}

/// Renders a sequence as dot/dash text.
#[derive(Clone, Copy, Debug)]
pub struct Pattern<'a>(pub &'a [Symbol]);

impl fmt::Display for Pattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.0 {
            fmt::Write::write_char(f, symbol.as_char())?;
        }
        Ok(())
    }
}
