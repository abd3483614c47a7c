//! Defines the [`Packing`] codec that compresses a board state into an integer key.
//!
//! Each tile value is stored as a fixed-width bit field, most significant field first, so that
//! the packing is bijective on valid states and stable across runs. The keys are used for
//! pattern database entries and for the solver's frontier.

use thiserror::Error;

use crate::puzzle::puzzle::Puzzle;

/// A compressed board state or pattern.
pub type StateKey = u128;

/// Error type for [`Packing::new`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PackingError {
    /// Returned when the board size is less than 2.
    #[error("InvalidSize: board size {0} must be at least 2")]
    InvalidSize(usize),

    /// Returned when the packed state does not fit the 128-bit key.
    #[error("BoardTooLarge: packing a {size}x{size} board needs {bits} bits, more than the 128 available")]
    BoardTooLarge {
        /// The requested board size.
        size: usize,
        /// The number of bits the packed state would need.
        bits: u32,
    },
}

/// State codec for one board size.
///
/// Uses `b = ⌈log₂(N²)⌉` bits per tile value. A `4x4` state packs into exactly 64 bits and a
/// `5x5` state into 125; boards above `5x5` do not fit a [`StateKey`] and are rejected by
/// [`Packing::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packing {
    size: usize,
    area: usize,
    bits_per_value: u32,
}

impl Packing {
    /// Creates the codec for boards of the given size.
    pub fn new(size: usize) -> Result<Self, PackingError> {
        if size < 2 {
            return Err(PackingError::InvalidSize(size));
        }

        let area = size * size;
        let bits_per_value = (area - 1).ilog2() + 1;
        let total_bits = bits_per_value * area as u32;
        if total_bits > StateKey::BITS {
            return Err(PackingError::BoardTooLarge {
                size,
                bits: total_bits,
            });
        }

        Ok(Self {
            size,
            area,
            bits_per_value,
        })
    }

    /// The board size this codec was built for.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of bits used per tile value.
    #[must_use]
    pub fn bits_per_value(&self) -> u32 {
        self.bits_per_value
    }

    /// Packs a flat piece sequence into a key, most significant field first.
    ///
    /// The sequence does not have to be a permutation: patterns, where every tile outside some
    /// group is zeroed, pack the same way.
    #[must_use]
    pub fn compress_pieces(&self, pieces: &[u8]) -> StateKey {
        debug_assert_eq!(pieces.len(), self.area);
        pieces
            .iter()
            .fold(0, |key, &n| (key << self.bits_per_value) | StateKey::from(n))
    }

    /// Packs a state into a key.
    #[must_use]
    pub fn compress(&self, puzzle: &Puzzle) -> StateKey {
        self.compress_pieces(puzzle.pieces())
    }

    /// The exact inverse of [`Packing::compress_pieces`].
    #[must_use]
    pub fn decompress_pieces(&self, key: StateKey) -> Vec<u8> {
        let mask = (1 << self.bits_per_value) - 1;
        (0..self.area)
            .map(|i| {
                let shift = (self.area - 1 - i) as u32 * self.bits_per_value;
                ((key >> shift) & mask) as u8
            })
            .collect()
    }

    /// The exact inverse of [`Packing::compress`].
    ///
    /// The key must have been produced by compressing a full (permutation) state, not a pattern.
    #[must_use]
    pub fn decompress(&self, key: StateKey) -> Puzzle {
        Puzzle::from_pieces_unchecked(self.decompress_pieces(key), self.size)
    }
}
