//! Defines the [`Direction`] type.

use rand::distr::{Distribution, StandardUniform};
use std::{
    fmt::{Display, Write as _},
    str::FromStr,
};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// The directions in which a tile can be moved.
///
/// Directions are named from the moved tile's perspective: [`Direction::Up`] slides the tile
/// below the blank upwards, which displaces the blank one row down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Moving the tile below the blank upwards.
    Up,
    /// Moving the tile right of the blank to the left.
    Left,
    /// Moving the tile above the blank downwards.
    Down,
    /// Moving the tile left of the blank to the right.
    Right,
}

impl Direction {
    /// All four directions, in the order the solver and the pattern database builder try them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The opposite direction. Swaps `Up` with `Down` and `Left` with `Right`.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
        }
    }

    /// The displacement `(row, column)` of the blank when a tile is moved in this direction.
    #[must_use]
    pub fn blank_offset(self) -> (i32, i32) {
        match self {
            Self::Up => (1, 0),
            Self::Left => (0, 1),
            Self::Down => (-1, 0),
            Self::Right => (0, -1),
        }
    }

    /// The 2-bit code of the direction, as used by the move-sequence codec.
    ///
    /// Codes are fixed by the blank displacement: `(-1, 0)` is 0b00, `(1, 0)` is 0b01, `(0, -1)`
    /// is 0b10, and `(0, 1)` is 0b11. They are stable across runs so that packed sequences stored
    /// on disk remain portable.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Down => 0b00,
            Self::Up => 0b01,
            Self::Right => 0b10,
            Self::Left => 0b11,
        }
    }

    /// The inverse of [`Direction::code`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0b00 => Some(Self::Down),
            0b01 => Some(Self::Up),
            0b10 => Some(Self::Right),
            0b11 => Some(Self::Left),
            _ => None,
        }
    }

    /// The letter naming the direction: `U`, `L`, `D`, or `R`.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Left => 'L',
            Self::Down => 'D',
            Self::Right => 'R',
        }
    }
}

impl Display for Direction {
    /// Writes the direction's [letter](Direction::letter).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.letter())
    }
}

/// Error type for [`TryFrom<char>`] and [`FromStr`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseDirectionError {
    /// Found a character that is not the letter of any direction.
    #[error("UnknownLetter: {0} does not name a direction (expected one of U, L, D, R)")]
    UnknownLetter(char),

    /// The string is empty.
    #[error("Empty: string is empty")]
    Empty,
}

impl TryFrom<char> for Direction {
    type Error = ParseDirectionError;

    /// The inverse of [`Direction::letter`].
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.letter() == value)
            .ok_or(ParseDirectionError::UnknownLetter(value))
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses a single-letter direction name. Longer strings are reported by their first
    /// character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseDirectionError::Empty)?;
        if chars.next().is_some() {
            return Err(ParseDirectionError::UnknownLetter(first));
        }
        Self::try_from(first)
    }
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        // Every 2-bit value is a valid direction code.
        Direction::from_code(rng.random_range(0..4)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use crate::algorithm::direction::{Direction, ParseDirectionError};

    #[test]
    fn test_letter_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.letter()), Ok(dir));
            assert_eq!(dir.to_string(), dir.letter().to_string());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Direction::from_str("U"), Ok(Direction::Up));
        assert_eq!(Direction::from_str("D"), Ok(Direction::Down));
        assert_eq!(
            Direction::from_str("x"),
            Err(ParseDirectionError::UnknownLetter('x'))
        );
        assert_eq!(
            Direction::from_str("UL"),
            Err(ParseDirectionError::UnknownLetter('U'))
        );
        assert_eq!(Direction::from_str(""), Err(ParseDirectionError::Empty));
    }

    #[test]
    fn test_inverse() {
        for dir in Direction::ALL {
            assert_ne!(dir.inverse(), dir);
            assert_eq!(dir.inverse().inverse(), dir);

            let (dr, dc) = dir.blank_offset();
            let (ir, ic) = dir.inverse().blank_offset();
            assert_eq!((dr + ir, dc + ic), (0, 0));
        }
    }

    #[test]
    fn test_code_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code(4), None);
    }
}
