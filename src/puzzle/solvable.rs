//! Defines the parity check deciding whether a state can reach the solved state.

use crate::puzzle::puzzle::Puzzle;

/// Checks if the state can be transformed into the solved state.
///
/// Scans the board left to right keeping a sorted list of the tiles seen so far; each non-blank
/// tile contributes its insertion index (the number of smaller tiles already seen). On boards of
/// even size the blank additionally contributes its row index, since vertical moves there change
/// the tile ordering parity and the blank row parity together. The state is solvable iff the
/// total is even.
#[must_use]
pub fn is_solvable(puzzle: &Puzzle) -> bool {
    let size = puzzle.size();
    let mut seen: Vec<u8> = Vec::with_capacity(puzzle.area());
    let mut sum = 0;

    for (i, &n) in puzzle.pieces().iter().enumerate() {
        if n == 0 {
            if size % 2 == 0 {
                sum += i / size;
            }
        } else {
            let idx = seen.partition_point(|&m| m < n);
            seen.insert(idx, n);
            sum += idx;
        }
    }

    sum % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Puzzle {
        s.parse().unwrap()
    }

    #[test]
    fn test_solved_states_are_solvable() {
        for size in 2..=5 {
            assert!(is_solvable(&Puzzle::solved(size)));
        }
    }

    #[test]
    fn test_swapped_last_two_tiles_is_unsolvable() {
        // The classic unsolvable 15-puzzle: tiles 14 and 15 swapped.
        let p = parse("1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0");
        assert!(!is_solvable(&p));
    }

    #[test]
    fn test_3x3_cases() {
        assert!(is_solvable(&parse("1 2 3 4 5 6 0 7 8")));
        assert!(is_solvable(&parse("1 2 3 4 5 0 7 8 6")));
        assert!(is_solvable(&parse("0 8 7 6 5 4 3 2 1")));
        assert!(!is_solvable(&parse("2 1 3 4 5 6 7 8 0")));
        assert!(!is_solvable(&parse("4 5 6 1 2 3 7 8 0")));
    }

    #[test]
    fn test_4x4_cases() {
        assert!(is_solvable(&parse("2 3 1 4 5 6 7 8 9 10 11 12 13 14 15 0")));
        assert!(!is_solvable(&parse("2 1 3 4 5 6 7 8 9 10 11 12 13 14 15 0")));
    }

    #[test]
    fn test_every_move_preserves_solvability() {
        use crate::algorithm::direction::Direction;

        for start in [
            "5 1 2 4 9 6 3 8 0 10 7 11 13 14 15 12",
            "1 2 3 4 5 0 7 8 6",
        ] {
            let p = parse(start);
            assert!(is_solvable(&p));

            for dir in Direction::ALL {
                if let Some((q, _)) = p.apply(dir) {
                    assert!(is_solvable(&q));
                }
            }
        }
    }
}
