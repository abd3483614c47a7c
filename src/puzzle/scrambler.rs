//! Defines the [`Scrambler`] trait and the [`RandomMoves`] scrambler.

use rand::Rng;

use crate::{algorithm::direction::Direction, puzzle::puzzle::Puzzle};

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Trait defining a scrambling algorithm.
pub trait Scrambler {
    /// Equivalent to [`Scrambler::scramble_with_rng`] using [`rand::rng`].
    #[cfg(feature = "thread_rng")]
    fn scramble(&self, puzzle: &mut Puzzle) {
        self.scramble_with_rng(puzzle, &mut rand::rng());
    }

    /// Scrambles the puzzle using a given [`Rng`].
    fn scramble_with_rng<R: Rng>(&self, puzzle: &mut Puzzle, rng: &mut R);
}

/// Scrambles the puzzle by applying a fixed number of random tile moves.
///
/// Because only legal moves are applied, the scrambled state is always solvable and its optimal
/// solution is at most `moves` long.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomMoves {
    /// Number of random moves to apply.
    pub moves: u64,
    /// Are backtracking moves allowed? E.g. if one move of the scramble is R, is the next move
    /// allowed to be L? If this is false, the L move will not be allowed and a different move
    /// will be generated.
    pub allow_backtracking: bool,
}

impl Scrambler for RandomMoves {
    fn scramble_with_rng<R: Rng>(&self, puzzle: &mut Puzzle, rng: &mut R) {
        let mut last_dir = None::<Direction>;
        for _ in 0..self.moves {
            let next = loop {
                let dir = rng.random::<Direction>();
                if !self.allow_backtracking && last_dir == Some(dir.inverse()) {
                    continue;
                }
                if let Some((next, _)) = puzzle.apply(dir) {
                    break (next, dir);
                }
            };

            last_dir = Some(next.1);
            *puzzle = next.0;
        }
    }
}
