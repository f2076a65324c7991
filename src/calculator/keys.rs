//! Keypad events accepted by the calculator.
//!
//! Decouples the state machine from whatever surface produces the presses
//! (buttons, a terminal, a test script).

use std::fmt;

use thiserror::Error;

/// A single decimal digit key, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit from its numeric value. Returns `None` above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Create a digit from an ASCII character.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    /// The digit as the character written into the formula.
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Binary arithmetic operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The symbol appended to the formula and shown on the display.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parse an operator symbol. `x` is accepted as a multiply alias.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A discrete key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Reset to the initial state.
    Clear,
    /// A digit key.
    Digit(Digit),
    /// The decimal point key.
    Decimal,
    /// An operator key.
    Operator(Operator),
    /// Evaluate the formula.
    Equals,
}

impl Key {
    /// Map a character to a key, if it names one.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = Digit::from_char(c) {
            return Some(Self::Digit(d));
        }
        if let Some(op) = Operator::from_char(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => None,
        }
    }
}

/// A character that does not correspond to any key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no key for character {ch:?} at position {position}")]
pub struct KeyError {
    pub ch: char,
    pub position: usize,
}

/// Parse a string of key characters, ignoring whitespace.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, ch)| Key::from_char(ch).ok_or(KeyError { ch, position }))
        .collect()
}
