//! Defines the [`TileGroup`] and [`Partition`] types describing how the tiles are split between
//! pattern databases.

use std::fmt::Display;

use itertools::Itertools as _;
use thiserror::Error;

use crate::puzzle::puzzle::MAX_SIZE;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// A set of tile values tracked by one pattern database.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileGroup {
    tiles: Vec<u8>,
}

impl TileGroup {
    /// Creates a new [`TileGroup`] from a list of tile values. Duplicates are merged and the
    /// tiles are kept sorted.
    #[must_use]
    pub fn new(tiles: impl IntoIterator<Item = u8>) -> Self {
        let mut tiles: Vec<u8> = tiles.into_iter().collect();
        tiles.sort_unstable();
        tiles.dedup();
        Self { tiles }
    }

    /// The tile values of the group, in ascending order.
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// The number of tiles in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Checks if the group contains no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Checks if a tile value belongs to the group.
    #[must_use]
    pub fn contains(&self, tile: u8) -> bool {
        self.tiles.binary_search(&tile).is_ok()
    }
}

impl Display for TileGroup {
    /// Formats the group as its tile values in braces, e.g. `{1, 2, 3, 4, 7}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.tiles.iter().join(", "))
    }
}

/// Error type for [`Partition::new`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartitionError {
    /// Returned when the board size is outside the supported range.
    #[error("InvalidSize: board size {0} must be between 2 and 15")]
    InvalidSize(usize),

    /// Returned when a group contains no tiles.
    #[error("EmptyGroup: every group must contain at least one tile")]
    EmptyGroup,

    /// Returned when a tile value is not a tile of the board (1 to `N² - 1`).
    #[error("TileOutOfRange: tile {tile} is not on a {size}x{size} board")]
    TileOutOfRange {
        /// The offending tile value.
        tile: u8,
        /// The board size.
        size: usize,
    },

    /// Returned when a tile appears in more than one group.
    #[error("DuplicateTile: tile {0} appears in more than one group")]
    DuplicateTile(u8),

    /// Returned when a tile of the board appears in no group.
    #[error("MissingTile: tile {0} appears in no group")]
    MissingTile(u8),
}

/// A list of disjoint [`TileGroup`]s that together cover every tile of an `NxN` board.
///
/// The disjointness is what makes the per-group pattern database costs additive: no tile move is
/// ever counted by two databases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    size: usize,
    groups: Vec<TileGroup>,
}

impl Partition {
    /// Creates a new [`Partition`] for the given board size, checking that the groups are
    /// non-empty, disjoint, and cover every tile from 1 to `N² - 1`.
    pub fn new(size: usize, groups: Vec<TileGroup>) -> Result<Self, PartitionError> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(PartitionError::InvalidSize(size));
        }

        let area = size * size;
        let mut covered = vec![false; area];
        for group in &groups {
            if group.is_empty() {
                return Err(PartitionError::EmptyGroup);
            }
            for &tile in group.tiles() {
                if tile == 0 || tile as usize >= area {
                    return Err(PartitionError::TileOutOfRange { tile, size });
                }
                if covered[tile as usize] {
                    return Err(PartitionError::DuplicateTile(tile));
                }
                covered[tile as usize] = true;
            }
        }

        if let Some(missing) = covered.iter().skip(1).position(|&c| !c) {
            return Err(PartitionError::MissingTile(missing as u8 + 1));
        }

        Ok(Self { size, groups })
    }

    /// The partition the solver uses by default for the given board size, or `None` if there is
    /// no default for that size.
    ///
    /// The `4x4` default is the 5-5-5 pattern; `3x3` splits into two groups of four, and `5x5`
    /// into four groups of six.
    #[must_use]
    pub fn standard(size: usize) -> Option<Self> {
        let groups: Vec<TileGroup> = match size {
            3 => vec![
                TileGroup::new([1, 2, 3, 4]),
                TileGroup::new([5, 6, 7, 8]),
            ],
            4 => vec![
                TileGroup::new([1, 2, 3, 4, 7]),
                TileGroup::new([5, 6, 9, 10, 13]),
                TileGroup::new([8, 11, 12, 14, 15]),
            ],
            5 => vec![
                TileGroup::new([1, 2, 3, 6, 7, 8]),
                TileGroup::new([4, 5, 9, 10, 14, 15]),
                TileGroup::new([11, 12, 13, 16, 17, 18]),
                TileGroup::new([19, 20, 21, 22, 23, 24]),
            ],
            _ => return None,
        };

        Some(Self { size, groups })
    }

    /// The board size the partition is for.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The groups of the partition.
    #[must_use]
    pub fn groups(&self) -> &[TileGroup] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_contains() {
        let group = TileGroup::new([7, 1, 3]);
        assert_eq!(group.tiles(), &[1, 3, 7]);
        assert!(group.contains(3));
        assert!(!group.contains(2));
    }

    #[test]
    fn test_group_display() {
        assert_eq!(TileGroup::new([5, 6, 9, 10, 13]).to_string(), "{5, 6, 9, 10, 13}");
    }

    #[test]
    fn test_standard_partitions_are_valid() {
        for size in [3, 4, 5] {
            let partition = Partition::standard(size).unwrap();
            assert_eq!(partition.size(), size);
            assert!(Partition::new(size, partition.groups().to_vec()).is_ok());
        }
        assert!(Partition::standard(6).is_none());
    }

    #[test]
    fn test_rejects_overlapping_groups() {
        let groups = vec![TileGroup::new([1, 2, 3, 4]), TileGroup::new([4, 5, 6, 7, 8])];
        assert_eq!(
            Partition::new(3, groups),
            Err(PartitionError::DuplicateTile(4))
        );
    }

    #[test]
    fn test_rejects_incomplete_cover() {
        let groups = vec![TileGroup::new([1, 2, 3, 4]), TileGroup::new([5, 6, 7])];
        assert_eq!(Partition::new(3, groups), Err(PartitionError::MissingTile(8)));
    }

    #[test]
    fn test_rejects_out_of_range_tiles() {
        let groups = vec![TileGroup::new([1, 2, 3, 4]), TileGroup::new([5, 6, 7, 8, 9])];
        assert_eq!(
            Partition::new(3, groups),
            Err(PartitionError::TileOutOfRange { tile: 9, size: 3 })
        );

        let groups = vec![TileGroup::new([0, 1, 2, 3, 4, 5, 6, 7, 8])];
        assert_eq!(
            Partition::new(3, groups),
            Err(PartitionError::TileOutOfRange { tile: 0, size: 3 })
        );
    }

    #[test]
    fn test_rejects_empty_group() {
        let groups = vec![TileGroup::new([]), TileGroup::new((1..=8).collect::<Vec<_>>())];
        assert_eq!(Partition::new(3, groups), Err(PartitionError::EmptyGroup));
    }
}
