//! Defines the [`Heuristic`] trait and the [`ManhattanDistance`] and [`PatternDbHeuristic`]
//! heuristics.

use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

use crate::{
    pdb::db::PatternDbSet,
    puzzle::{
        packing::{Packing, PackingError},
        puzzle::Puzzle,
    },
};

/// Provides a function returning a lower bound on the number of moves needed to solve a puzzle.
pub trait Heuristic<T>
where
    T: PrimInt + Unsigned,
{
    /// Returns a lower bound on the number of moves needed to solve `puzzle`.
    #[must_use]
    fn bound(&self, puzzle: &Puzzle) -> T;
}

/// The Manhattan distance of a piece sequence to the solved state: the sum over all non-blank
/// tiles of the grid distance from the tile's position to its solved position `tile - 1`.
///
/// Zero-valued cells are skipped, so calling this on a pattern yields the distance restricted to
/// the pattern's tiles.
pub(crate) fn manhattan_to_solved(pieces: &[u8], size: usize) -> usize {
    pieces
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(i, &tile)| {
            let goal = usize::from(tile) - 1;
            (i / size).abs_diff(goal / size) + (i % size).abs_diff(goal % size)
        })
        .sum()
}

/// Manhattan distance heuristic.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManhattanDistance;

impl<T> Heuristic<T> for ManhattanDistance
where
    T: PrimInt + Unsigned + 'static,
    usize: AsPrimitive<T>,
{
    fn bound(&self, puzzle: &Puzzle) -> T {
        manhattan_to_solved(puzzle.pieces(), puzzle.size()).as_()
    }
}

/// Disjoint additive pattern database heuristic.
///
/// For each group of the partition, the puzzle is restricted to the group's tiles and the
/// resulting pattern is looked up in the group's database; the per-group costs are summed.
/// Because the groups are disjoint and each database counts only moves of its own tiles, the sum
/// never overestimates and is consistent.
pub struct PatternDbHeuristic<'a> {
    databases: &'a PatternDbSet,
    packing: Packing,
    fallback_logged: Vec<AtomicBool>,
}

impl<'a> PatternDbHeuristic<'a> {
    /// Creates the heuristic from a loaded set of pattern databases.
    pub fn new(databases: &'a PatternDbSet) -> Result<Self, PackingError> {
        let packing = Packing::new(databases.size())?;
        let fallback_logged = databases
            .databases()
            .iter()
            .map(|_| AtomicBool::new(false))
            .collect();

        Ok(Self {
            databases,
            packing,
            fallback_logged,
        })
    }
}

impl<T> Heuristic<T> for PatternDbHeuristic<'_>
where
    T: PrimInt + Unsigned + 'static,
    usize: AsPrimitive<T>,
{
    fn bound(&self, puzzle: &Puzzle) -> T {
        let size = puzzle.size();
        let mut pattern = vec![0u8; puzzle.area()];
        let mut total = 0;

        for (db, logged) in self.databases.databases().iter().zip(&self.fallback_logged) {
            for (slot, &tile) in pattern.iter_mut().zip(puzzle.pieces()) {
                *slot = if db.group().contains(tile) { tile } else { 0 };
            }

            let key = self.packing.compress_pieces(&pattern);
            if let Some(cost) = db.lookup(key) {
                total += usize::from(cost);
            } else {
                // A complete database has every reachable pattern; the restricted Manhattan
                // distance is still admissible if one is somehow absent.
                if !logged.swap(true, Ordering::Relaxed) {
                    warn!(
                        "no pattern for group {} in database, falling back to Manhattan distance",
                        db.group()
                    );
                }
                total += manhattan_to_solved(&pattern, size);
            }
        }

        total.as_()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::pdb::{
        builder,
        db::{PatternDb, PatternDbSet},
        partition::{Partition, TileGroup},
    };

    use super::*;

    #[test]
    fn test_manhattan_of_solved_is_zero() {
        for size in 2..=5 {
            let p = Puzzle::solved(size);
            assert_eq!(Heuristic::<u32>::bound(&ManhattanDistance, &p), 0);
        }
    }

    #[test]
    fn test_manhattan_known_values() {
        let p: Puzzle = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15".parse().unwrap();
        assert_eq!(Heuristic::<u32>::bound(&ManhattanDistance, &p), 1);

        let p: Puzzle = "5 1 2 4 9 6 3 8 0 10 7 11 13 14 15 12".parse().unwrap();
        assert_eq!(Heuristic::<u32>::bound(&ManhattanDistance, &p), 8);

        let p: Puzzle = "1 2 3 4 5 6 0 8 9 10 7 12 13 14 11 15".parse().unwrap();
        assert_eq!(Heuristic::<u32>::bound(&ManhattanDistance, &p), 3);
    }

    #[test]
    fn test_pdb_heuristic_of_solved_is_zero() {
        let databases = builder::build(&Partition::standard(3).unwrap()).unwrap();
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();
        assert_eq!(Heuristic::<u32>::bound(&heuristic, &Puzzle::solved(3)), 0);
    }

    #[test]
    fn test_pdb_heuristic_dominates_nothing_it_should_not() {
        // Two moves from solved: the bound must be positive and admissible.
        let databases = builder::build(&Partition::standard(3).unwrap()).unwrap();
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();

        let p: Puzzle = "1 2 3 4 5 6 0 7 8".parse().unwrap();
        let bound: u32 = heuristic.bound(&p);
        assert!(bound >= 1 && bound <= 2);
    }

    #[test]
    fn test_missing_pattern_falls_back_to_manhattan() {
        // An empty table for a group covering the whole board degrades to plain Manhattan.
        let group = TileGroup::new(1..=8);
        let databases = PatternDbSet::new(3, vec![PatternDb::new(group, HashMap::new())]);
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();

        let p: Puzzle = "1 2 3 4 5 0 7 8 6".parse().unwrap();
        assert_eq!(
            Heuristic::<u32>::bound(&heuristic, &p),
            Heuristic::<u32>::bound(&ManhattanDistance, &p)
        );
    }
}
