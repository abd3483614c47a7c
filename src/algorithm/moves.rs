//! Defines the [`PackedMoves`] codec for compressing move sequences.
//!
//! Each move is encoded as 2 bits and the sequence length is embedded in the low 8 bits of the
//! packed value, so sequences of up to 255 moves can be stored. The packed value is held as the
//! little-endian bytes of the integer, which keeps the codec byte-exact without big-integer
//! arithmetic.

use thiserror::Error;

use crate::algorithm::direction::Direction;

/// The maximum number of moves a [`PackedMoves`] can hold, limited by the 8-bit length field.
pub const MAX_MOVES: usize = u8::MAX as usize;

/// Error type for [`PackedMoves::compress`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MovesError {
    /// The sequence is longer than [`MAX_MOVES`].
    #[error("TooManyMoves: sequence of {0} moves exceeds the maximum of 255")]
    TooManyMoves(usize),
}

/// A move sequence packed into an integer, stored as its little-endian bytes.
///
/// The low 8 bits hold the sequence length. Above them, each move occupies 2 bits with the first
/// move of the sequence at the highest code position, i.e. the most recent move is adjacent to
/// the length field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedMoves {
    bytes: Vec<u8>,
}

impl PackedMoves {
    /// Packs a sequence of moves.
    pub fn compress(moves: &[Direction]) -> Result<Self, MovesError> {
        let len = moves.len();
        if len > MAX_MOVES {
            return Err(MovesError::TooManyMoves(len));
        }

        let mut bytes = vec![0u8; 1 + (2 * len).div_ceil(8)];
        bytes[0] = len as u8;

        for (i, dir) in moves.iter().enumerate() {
            // The first move goes at the highest code position. Code positions start at bit 8,
            // just above the length field, and are 2 bits wide, so they never straddle a byte.
            let bit = 8 + 2 * (len - 1 - i);
            bytes[bit / 8] |= dir.code() << (bit % 8);
        }

        // Trim high zero bytes so that equal sequences compare equal.
        while bytes.len() > 1 && bytes[bytes.len() - 1] == 0 {
            bytes.pop();
        }

        Ok(Self { bytes })
    }

    /// Unpacks the sequence of moves.
    #[must_use]
    pub fn decompress(&self) -> Vec<Direction> {
        let len = self.len();
        let mut moves = Vec::with_capacity(len);

        for i in 0..len {
            let bit = 8 + 2 * (len - 1 - i);
            let byte = self.bytes.get(bit / 8).copied().unwrap_or(0);
            let code = (byte >> (bit % 8)) & 0b11;

            // Every 2-bit value is a valid direction code.
            moves.push(Direction::from_code(code).unwrap());
        }

        moves
    }

    /// The number of moves in the sequence, read from the length field without decompressing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes[0] as usize
    }

    /// Checks if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The little-endian bytes of the packed value.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
