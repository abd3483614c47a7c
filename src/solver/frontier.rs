//! Defines the [`Frontier`] carrying overflow nodes between solver iterations.

use std::collections::HashMap;

use crate::{
    algorithm::{direction::Direction, moves::PackedMoves},
    puzzle::{
        packing::{Packing, StateKey},
        puzzle::Puzzle,
    },
};

/// The move path stored with a frontier node.
///
/// Paths of up to 255 moves are packed; longer ones are kept uncompressed rather than dropped,
/// since a node missing from the frontier would never be explored again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredMoves {
    /// A packed path.
    Packed(PackedMoves),
    /// A path too long to pack.
    Raw(Vec<Direction>),
}

impl StoredMoves {
    fn new(moves: &[Direction]) -> Self {
        match PackedMoves::compress(moves) {
            Ok(packed) => Self::Packed(packed),
            Err(_) => Self::Raw(moves.to_vec()),
        }
    }

    /// The number of moves on the path, without unpacking.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Packed(packed) => packed.len(),
            Self::Raw(moves) => moves.len(),
        }
    }

    /// Checks if the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The moves of the path.
    #[must_use]
    pub fn into_moves(self) -> Vec<Direction> {
        match self {
            Self::Packed(packed) => packed.decompress(),
            Self::Raw(moves) => moves,
        }
    }
}

/// Nodes whose f-cost exceeded the current search bound, keyed by their packed state.
///
/// The frontier is created empty at the start of a solve, grown by the recursive search, drained
/// by the driver across iterations, and discarded when the solve completes. Keeping these nodes
/// lets later iterations resume below them instead of re-expanding the interior of the search
/// tree.
#[derive(Debug)]
pub struct Frontier {
    packing: Packing,
    nodes: HashMap<StateKey, StoredMoves>,
}

impl Frontier {
    /// Creates an empty frontier using the given state codec.
    #[must_use]
    pub fn new(packing: Packing) -> Self {
        Self {
            packing,
            nodes: HashMap::new(),
        }
    }

    /// The number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a node and its move path from the search root, replacing any previous entry for
    /// the same state.
    pub fn record(&mut self, state: &Puzzle, moves: &[Direction]) {
        self.nodes
            .insert(self.packing.compress(state), StoredMoves::new(moves));
    }

    /// Removes the entry for a state, if present. Called when the search is about to explore the
    /// state below the current bound anyway.
    pub fn remove(&mut self, state: &Puzzle) {
        self.nodes.remove(&self.packing.compress(state));
    }

    /// A snapshot of the stored keys. The frontier may be mutated while the snapshot is walked;
    /// callers re-check membership with [`Frontier::take`].
    #[must_use]
    pub fn keys(&self) -> Vec<StateKey> {
        self.nodes.keys().copied().collect()
    }

    /// Removes and returns the entry for a key.
    pub fn take(&mut self, key: StateKey) -> Option<StoredMoves> {
        self.nodes.remove(&key)
    }

    /// Puts an entry back, e.g. when its node is still beyond the current bound.
    pub fn insert(&mut self, key: StateKey, moves: StoredMoves) {
        self.nodes.insert(key, moves);
    }

    /// Unpacks the state a key stands for.
    #[must_use]
    pub fn state(&self, key: StateKey) -> Puzzle {
        self.packing.decompress(key)
    }
}
