//! Defines the [`Solver`] struct computing optimal solutions by IDA* search.

use log::debug;

use crate::{
    algorithm::direction::Direction,
    puzzle::{packing::Packing, puzzle::Puzzle, solvable::is_solvable},
    solver::{frontier::Frontier, heuristic::Heuristic},
};

/// Sentinel cost meaning no admissible continuation exists.
const INFINITY: u32 = u32::MAX;

/// Outcome of one recursive search call.
enum SearchResult {
    /// The goal was reached; the accumulated move sequence is the solution.
    Found,
    /// The minimum f-cost among nodes that exceeded the bound, or [`INFINITY`] if there were
    /// none.
    Exceeded(u32),
}

/// Configuration of a [`Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Carry nodes whose f-cost exceeded the bound across iterations, so that the next iteration
    /// resumes below them instead of re-expanding the interior of the search tree. Pure
    /// performance refinement: solutions have the same optimal length either way.
    pub use_frontier: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { use_frontier: true }
    }
}

/// An optimal solver: iterative-deepening depth-first search with an admissible heuristic bound,
/// branch cycle pruning, and reverse-move pruning.
pub struct Solver<'a, H> {
    heuristic: &'a H,
    config: SolverConfig,
}

impl<'a, H> Solver<'a, H>
where
    H: Heuristic<u32>,
{
    /// Constructs a new [`Solver`] with the default configuration.
    pub fn new(heuristic: &'a H) -> Self {
        Self::with_config(heuristic, SolverConfig::default())
    }

    /// Constructs a new [`Solver`] with the given configuration.
    pub fn with_config(heuristic: &'a H, config: SolverConfig) -> Self {
        Self { heuristic, config }
    }

    /// Finds a shortest move sequence transforming `puzzle` into the solved state, or `None` if
    /// no solution exists.
    pub fn solve(&self, puzzle: &Puzzle) -> Option<Vec<Direction>> {
        if puzzle.is_solved() {
            return Some(Vec::new());
        }
        if !is_solvable(puzzle) {
            return None;
        }

        let mut frontier = if self.config.use_frontier {
            match Packing::new(puzzle.size()) {
                Ok(packing) => Some(Frontier::new(packing)),
                Err(e) => {
                    debug!("frontier disabled: {e}");
                    None
                }
            }
        } else {
            None
        };

        let mut bound = self.heuristic.bound(puzzle);

        loop {
            let result = match &mut frontier {
                Some(f) if !f.is_empty() => {
                    let mut min_exceeded = INFINITY;
                    let mut solution = None;

                    // Sub-searches mutate the frontier while we walk it, so take a key snapshot
                    // and re-check membership at every step.
                    for key in f.keys() {
                        let Some(stored) = f.take(key) else {
                            continue;
                        };

                        let state = f.state(key);
                        let depth = stored.len() as u32;
                        let cost = depth + self.heuristic.bound(&state);

                        if cost > bound {
                            // Still out of reach; keep it for a later iteration.
                            min_exceeded = min_exceeded.min(cost);
                            f.insert(key, stored);
                            continue;
                        }

                        // Resume below this node with a fresh path; cycle detection only ever
                        // applies to the branch being explored.
                        let mut moves = stored.into_moves();
                        let mut path = vec![state];

                        match self.search(&mut path, depth, bound, &mut moves, Some(&mut *f)) {
                            SearchResult::Found => {
                                solution = Some(moves);
                                break;
                            }
                            SearchResult::Exceeded(c) => min_exceeded = min_exceeded.min(c),
                        }
                    }

                    if let Some(moves) = solution {
                        return Some(moves);
                    }
                    min_exceeded
                }
                rest => {
                    let mut path = vec![puzzle.clone()];
                    let mut moves = Vec::new();

                    match self.search(&mut path, 0, bound, &mut moves, rest.as_mut()) {
                        SearchResult::Found => return Some(moves),
                        SearchResult::Exceeded(c) => c,
                    }
                }
            };

            if result == INFINITY {
                return None;
            }

            debug!(
                "raising bound from {bound} to {result} (frontier: {} nodes)",
                frontier.as_ref().map_or(0, Frontier::len)
            );
            bound = result;
        }
    }

    fn search(
        &self,
        path: &mut Vec<Puzzle>,
        depth: u32,
        bound: u32,
        moves: &mut Vec<Direction>,
        mut frontier: Option<&mut Frontier>,
    ) -> SearchResult {
        let current = path.last().expect("path is never empty").clone();

        let cost = depth + self.heuristic.bound(&current);
        if cost > bound {
            if let Some(f) = frontier.as_deref_mut() {
                f.record(&current, moves);
            }
            return SearchResult::Exceeded(cost);
        }

        if current.is_solved() {
            return SearchResult::Found;
        }

        let mut min_exceeded = INFINITY;

        for dir in Direction::ALL {
            // Undoing the move that led here cannot be part of a shortest path.
            if moves.last() == Some(&dir.inverse()) {
                continue;
            }

            let Some((next, _)) = current.apply(dir) else {
                continue;
            };

            // Branch cycle prune: revisiting a state on the current branch cannot be optimal.
            if path.contains(&next) {
                continue;
            }

            // About to explore this state below the bound, so its frontier entry is stale.
            if let Some(f) = frontier.as_deref_mut() {
                f.remove(&next);
            }

            path.push(next);
            moves.push(dir);

            match self.search(path, depth + 1, bound, moves, frontier.as_deref_mut()) {
                SearchResult::Found => return SearchResult::Found,
                SearchResult::Exceeded(c) => min_exceeded = min_exceeded.min(c),
            }

            path.pop();
            moves.pop();
        }

        SearchResult::Exceeded(min_exceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pdb::{
            builder,
            db::PatternDbSet,
            partition::{Partition, TileGroup},
        },
        puzzle::scrambler::{RandomMoves, Scrambler as _},
        solver::heuristic::{ManhattanDistance, PatternDbHeuristic},
    };

    use rand::SeedableRng as _;
    use rand_xoshiro::Xoroshiro128StarStar;

    const SEED: [u8; 16] = [
        160, 108, 126, 255, 147, 210, 122, 252, 71, 77, 144, 13, 167, 11, 225, 93,
    ];

    /// The six 4x4 end-to-end scenarios. Every initial state here has a heuristic equal to its
    /// optimal solution length, so the solver finds the solution in its first iteration and the
    /// fixed move ordering makes the exact move sequence deterministic in both frontier modes.
    fn scenarios() -> Vec<(&'static str, Vec<Direction>)> {
        use Direction::{Down, Left, Up};

        vec![
            ("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 0", vec![]),
            ("1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15", vec![Left]),
            ("1 2 3 4 5 6 7 8 9 10 11 12 13 0 14 15", vec![Left, Left]),
            ("1 2 3 4 5 6 0 8 9 10 7 11 13 14 15 12", vec![Up, Left, Up]),
            (
                "1 2 3 4 5 0 6 8 9 10 7 11 13 14 15 12",
                vec![Left, Up, Left, Up],
            ),
            (
                "5 1 2 4 9 6 3 8 0 10 7 11 13 14 15 12",
                vec![Down, Down, Left, Left, Up, Up, Left, Up],
            ),
        ]
    }

    /// A partition of small groups that builds quickly; used instead of the 5-5-5 pattern to
    /// keep the tests fast.
    fn quick_4x4_databases() -> PatternDbSet {
        let partition = Partition::new(
            4,
            vec![
                TileGroup::new([1, 2, 3]),
                TileGroup::new([4, 5, 6]),
                TileGroup::new([7, 8, 9]),
                TileGroup::new([10, 11, 12]),
                TileGroup::new([13, 14, 15]),
            ],
        )
        .unwrap();
        builder::build(&partition).unwrap()
    }

    fn assert_solves(puzzle: &Puzzle, moves: &[Direction]) {
        let mut state = puzzle.clone();
        for &dir in moves {
            let (next, _) = state.apply(dir).unwrap();
            state = next;
        }
        assert!(state.is_solved());
    }

    #[test]
    fn test_solved_puzzle_needs_no_moves() {
        let solver = Solver::new(&ManhattanDistance);
        assert_eq!(solver.solve(&Puzzle::solved(4)), Some(Vec::new()));
    }

    #[test]
    fn test_scenarios_with_manhattan() {
        for use_frontier in [false, true] {
            let solver = Solver::with_config(&ManhattanDistance, SolverConfig { use_frontier });

            for (input, expected) in scenarios() {
                let puzzle: Puzzle = input.parse().unwrap();
                assert_eq!(solver.solve(&puzzle), Some(expected));
            }
        }
    }

    #[test]
    fn test_scenarios_with_pattern_databases() {
        let databases = quick_4x4_databases();
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();

        for use_frontier in [false, true] {
            let solver = Solver::with_config(&heuristic, SolverConfig { use_frontier });

            for (input, expected) in scenarios() {
                let puzzle: Puzzle = input.parse().unwrap();
                let solution = solver.solve(&puzzle).unwrap();
                assert_eq!(solution, expected);
                assert_solves(&puzzle, &solution);
            }
        }
    }

    #[test]
    fn test_unsolvable_puzzle_has_no_solution() {
        let puzzle: Puzzle = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0".parse().unwrap();

        for use_frontier in [false, true] {
            let solver = Solver::with_config(&ManhattanDistance, SolverConfig { use_frontier });
            assert_eq!(solver.solve(&puzzle), None);
        }
    }

    #[test]
    fn test_frontier_and_classical_solutions_have_equal_length() {
        let databases = builder::build(&Partition::standard(3).unwrap()).unwrap();
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();
        let with_frontier = Solver::with_config(&heuristic, SolverConfig { use_frontier: true });
        let without_frontier =
            Solver::with_config(&heuristic, SolverConfig { use_frontier: false });

        let mut rng = Xoroshiro128StarStar::from_seed(SEED);
        let scrambler = RandomMoves {
            moves: 25,
            allow_backtracking: false,
        };

        for _ in 0..20 {
            let mut puzzle = Puzzle::solved(3);
            scrambler.scramble_with_rng(&mut puzzle, &mut rng);

            let a = with_frontier.solve(&puzzle).unwrap();
            let b = without_frontier.solve(&puzzle).unwrap();
            assert_eq!(a.len(), b.len());
            assert_solves(&puzzle, &a);
            assert_solves(&puzzle, &b);
        }
    }

    #[test]
    fn test_pattern_database_solutions_are_optimal() {
        // Manhattan-guided IDA* is the reference: both heuristics are admissible, so the
        // solution lengths must agree.
        let databases = builder::build(&Partition::standard(3).unwrap()).unwrap();
        let pdb_heuristic = PatternDbHeuristic::new(&databases).unwrap();
        let pdb_solver = Solver::new(&pdb_heuristic);
        let reference = Solver::new(&ManhattanDistance);

        let mut rng = Xoroshiro128StarStar::from_seed(SEED);
        let scrambler = RandomMoves {
            moves: 30,
            allow_backtracking: false,
        };

        for _ in 0..10 {
            let mut puzzle = Puzzle::solved(3);
            scrambler.scramble_with_rng(&mut puzzle, &mut rng);

            let solution = pdb_solver.solve(&puzzle).unwrap();
            let reference_solution = reference.solve(&puzzle).unwrap();
            assert_eq!(solution.len(), reference_solution.len());

            // Admissibility: the heuristic never overestimates the true distance.
            let bound: u32 = pdb_heuristic.bound(&puzzle);
            assert!(bound as usize <= solution.len());
        }
    }

    #[test]
    fn test_hardest_8_puzzle_state() {
        // A known antipode of the 3x3 puzzle, 31 moves from solved. The heuristic starts well
        // below 31, so the frontier actually carries nodes across several iterations here.
        let puzzle: Puzzle = "8 6 7 2 5 4 3 0 1".parse().unwrap();

        let databases = builder::build(&Partition::standard(3).unwrap()).unwrap();
        let heuristic = PatternDbHeuristic::new(&databases).unwrap();

        for use_frontier in [false, true] {
            let solver = Solver::with_config(&heuristic, SolverConfig { use_frontier });
            let solution = solver.solve(&puzzle).unwrap();
            assert_eq!(solution.len(), 31);
            assert_solves(&puzzle, &solution);
        }
    }
}
