//! Optimal solver for sliding-tile puzzles of arbitrary square size (the 8-, 15-, and 24-puzzles
//! being the common instances).
//!
//! The solver is an IDA* (Iterative Deepening A*) search guided by disjoint additive pattern
//! databases: for a partition of the tiles into groups, each group gets a table mapping every
//! reachable configuration of its tiles to the minimum number of in-group moves needed to bring
//! them home. Because the groups are disjoint, the per-group costs sum to an admissible and
//! consistent heuristic.
//!
//! The crate is split into four modules:
//!
//! - [`puzzle`] — the board representation, state codec, parity-based solvability check, and
//!   scramblers.
//! - [`algorithm`] — the [`Direction`] move type and the packed move-sequence codec.
//! - [`pdb`] — construction, storage, and loading of pattern databases.
//! - [`solver`] — the IDA* driver and heuristics.
//!
//! # Example
//!
//! ```
//! use npuzzle::{
//!     pdb::{builder, partition::Partition},
//!     puzzle::puzzle::Puzzle,
//!     solver::{heuristic::PatternDbHeuristic, solver::Solver},
//! };
//!
//! let partition = Partition::standard(3).unwrap();
//! let databases = builder::build(&partition).unwrap();
//! let heuristic = PatternDbHeuristic::new(&databases).unwrap();
//! let solver = Solver::new(&heuristic);
//!
//! let puzzle: Puzzle = "1 2 3 4 5 6 0 7 8".parse().unwrap();
//! let solution = solver.solve(&puzzle).unwrap();
//! assert_eq!(solution.len(), 2);
//! ```
//!
//! [`Direction`]: algorithm::direction::Direction

pub mod algorithm;
pub mod pdb;
pub mod puzzle;
pub mod solver;
