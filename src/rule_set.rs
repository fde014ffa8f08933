use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::State;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Largest number of neighbors a cell can have.
pub const MAX_NEIGHBORS: u8 = 8;

/// A birth/survival transition rule.
///
/// # Representation
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Expected a digit between 0 and 8, but got '{0}'")]
    InvalidDigit(char),

    #[error("Unexpected character '{0}' in rule")]
    UnexpectedChar(char),

    #[error("Expected a rule like B3/S23 or 3/23, but got \"{0}\"")]
    Malformed(String),
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// The state a cell moves to given its current state and number of alive neighbors.
    pub fn next_state(&self, state: State, neighbors: u8) -> State {
        if neighbors > MAX_NEIGHBORS {
            return State::Dead;
        }

        let n: u16 = 1 << neighbors;

        match state {
            // survival, otherwise under- or overpopulation
            State::Alive if self.survivals() & n != 0 => State::Alive,
            State::Alive => State::Dead,

            // birth
            State::Dead if self.births() & n != 0 => State::Alive,
            State::Dead => State::Dead,
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=MAX_NEIGHBORS)
                .filter(|&n| mask & (1u16 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

/// Parses `b3/s23`, `B3/S23`, `b3s23` and the nameless `3/23` (births first).
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim();
        let malformed = || RuleError::Malformed(rule.to_string());

        if let Some(c) = rule
            .chars()
            .find(|&c| !c.is_ascii_digit() && !matches!(c, 'b' | 'B' | 's' | 'S' | '/'))
        {
            return Err(RuleError::UnexpectedChar(c));
        }

        let (births, survivals) = match rule.strip_prefix(['b', 'B']) {
            Some(rest) => {
                let (births, survivals) = rest.split_once(['s', 'S']).ok_or_else(malformed)?;

                // The slash before the `s` is optional
                (births.strip_suffix('/').unwrap_or(births), survivals)
            }
            None => rule.split_once('/').ok_or_else(malformed)?,
        };

        Ok(RuleSet::new(digits_to_mask(births)?, digits_to_mask(survivals)?))
    }
}

/// Convert neighbor counts such as `23` to their bitmask. Anything but a digit in `0..=8` is
/// rejected, which also catches repeated or misplaced `b`, `s` and `/`.
fn digits_to_mask(digits: &str) -> Result<u16, RuleError> {
    digits.chars().try_fold(0u16, |mask, c| {
        let n = c.to_digit(10).ok_or(RuleError::UnexpectedChar(c))?;

        if n > MAX_NEIGHBORS as u32 {
            return Err(RuleError::InvalidDigit(c));
        }

        Ok(mask | 1 << n)
    })
}
