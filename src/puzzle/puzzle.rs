//! Defines the [`Puzzle`] type representing a board state.

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use itertools::Itertools as _;
use thiserror::Error;

use crate::algorithm::direction::Direction;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// The largest supported board size. Bounded so that every tile value fits in a `u8`.
pub const MAX_SIZE: usize = 15;

/// An `NxN` sliding puzzle state.
///
/// The board is stored as a flat row-major sequence of `N²` values, each of `0` to `N² - 1`
/// occurring exactly once. The value 0 is the blank. Index `i` denotes row `i / N`, column
/// `i % N`.
///
/// States are immutable: [`Puzzle::apply`] returns a new state and leaves the receiver
/// untouched. Equality and hashing are by the piece sequence, so states can be kept in sets and
/// used for cycle detection.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Puzzle {
    pieces: Vec<u8>,
    size: usize,
    blank: usize,
}

/// Error type for [`Puzzle`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// Returned when the number of tiles is not a perfect square.
    #[error("NotSquare: number of tiles {0} is not a perfect square")]
    NotSquare(usize),

    /// Returned when the board size is outside the supported range (2 to [`MAX_SIZE`]).
    #[error("InvalidSize: board size {0} must be between 2 and 15")]
    InvalidSize(usize),

    /// Returned when a tile value is out of range (0 to `N² - 1`).
    #[error("PieceOutOfRange: piece {0} is out of range")]
    PieceOutOfRange(usize),

    /// Returned when a tile value appears more than once.
    #[error("DuplicatePiece: piece {0} appears more than once")]
    DuplicatePiece(u8),

    /// Returned when a token of the input string is not an integer.
    #[error("ParseError: {0}")]
    ParseError(ParseIntError),
}

impl Puzzle {
    /// Creates a new [`Puzzle`] of the given size in the solved state `(1, 2, ..., N² - 1, 0)`.
    ///
    /// # Panics
    ///
    /// If `size` is outside the range 2 to [`MAX_SIZE`].
    #[must_use]
    pub fn solved(size: usize) -> Self {
        assert!(
            (2..=MAX_SIZE).contains(&size),
            "board size {size} must be between 2 and {MAX_SIZE}"
        );

        let area = size * size;
        let mut pieces: Vec<u8> = (1..area as u8).collect();
        pieces.push(0);

        Self {
            pieces,
            size,
            blank: area - 1,
        }
    }

    /// Creates a new [`Puzzle`] from a flat row-major list of tile values.
    ///
    /// The list length must be a perfect square and the values must be exactly the integers from
    /// 0 to `N² - 1`.
    pub fn with_pieces(pieces: &[usize]) -> Result<Self, PuzzleError> {
        let area = pieces.len();
        let size = area.isqrt();
        if size * size != area {
            return Err(PuzzleError::NotSquare(area));
        }
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::InvalidSize(size));
        }

        let mut seen = vec![false; area];
        let mut blank = 0;
        for (i, &n) in pieces.iter().enumerate() {
            if n >= area {
                return Err(PuzzleError::PieceOutOfRange(n));
            }
            if seen[n] {
                return Err(PuzzleError::DuplicatePiece(n as u8));
            }

            seen[n] = true;

            if n == 0 {
                blank = i;
            }
        }

        Ok(Self {
            pieces: pieces.iter().map(|&n| n as u8).collect(),
            size,
            blank,
        })
    }

    /// Creates a new [`Puzzle`] from a piece list known to be a valid permutation.
    pub(crate) fn from_pieces_unchecked(pieces: Vec<u8>, size: usize) -> Self {
        let blank = pieces.iter().position(|&n| n == 0).unwrap_or(0);
        Self {
            pieces,
            size,
            blank,
        }
    }

    /// The width (equal to the height) of the board.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of cells on the board, `N²`.
    #[must_use]
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    /// The flat row-major piece sequence.
    #[must_use]
    pub fn pieces(&self) -> &[u8] {
        &self.pieces
    }

    /// The index of the blank cell.
    #[must_use]
    pub fn blank_position(&self) -> usize {
        self.blank
    }

    /// Checks if the state is the solved state.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let area = self.area();
        self.pieces
            .iter()
            .enumerate()
            .all(|(i, &n)| n as usize == (i + 1) % area)
    }

    /// Moves a tile in the given [`Direction`], returning the successor state and the value of
    /// the tile that moved, or `None` if the blank would leave the board.
    #[must_use]
    pub fn apply(&self, direction: Direction) -> Option<(Self, u8)> {
        let size = self.size as i32;
        let (row, col) = ((self.blank / self.size) as i32, (self.blank % self.size) as i32);
        let (dr, dc) = direction.blank_offset();
        let (new_row, new_col) = (row + dr, col + dc);

        if new_row < 0 || new_row >= size || new_col < 0 || new_col >= size {
            return None;
        }

        let new_blank = (new_row * size + new_col) as usize;
        let moved_tile = self.pieces[new_blank];

        let mut pieces = self.pieces.clone();
        pieces.swap(self.blank, new_blank);

        Some((
            Self {
                pieces,
                size: self.size,
                blank: new_blank,
            },
            moved_tile,
        ))
    }
}

impl Display for Puzzle {
    /// Formats the state as its space-separated row-major tile values.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pieces.iter().join(" "))
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    /// Parses a whitespace-separated row-major list of tile values, with 0 as the blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces = s
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(PuzzleError::ParseError)?;

        Self::with_pieces(&pieces)
    }
}
