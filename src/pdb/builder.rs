//! Builds pattern databases by breadth-first enumeration from the solved state.
//!
//! For each tile group the search walks the full state space, but only counts moves of the
//! group's own tiles. The cost metric is therefore uniform in group moves: blank manoeuvres
//! through tiles outside the group are free, which is exactly what makes the per-group costs
//! additive across a disjoint partition.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;
use rayon::prelude::*;

use crate::{
    algorithm::direction::Direction,
    pdb::{
        db::{PatternDb, PatternDbSet},
        partition::{Partition, TileGroup},
    },
    puzzle::{
        packing::{Packing, PackingError, StateKey},
        puzzle::Puzzle,
    },
};

/// Builds the pattern databases for every group of the partition, one worker per group.
///
/// Building can take minutes for the larger standard partitions; the per-group tables for a
/// `4x4` 5-5-5 partition have 524,160 entries each.
pub fn build(partition: &Partition) -> Result<PatternDbSet, PackingError> {
    let packing = Packing::new(partition.size())?;

    // Groups share nothing, so they build in parallel.
    let databases = partition
        .groups()
        .par_iter()
        .map(|group| build_group(partition.size(), group, &packing))
        .collect();

    Ok(PatternDbSet::new(partition.size(), databases))
}

fn build_group(size: usize, group: &TileGroup, packing: &Packing) -> PatternDb {
    let area = size * size;

    // Slot index per tracked tile: the blank first, then the group tiles in ascending order.
    // The visited set is keyed by the positions of exactly these tiles, which is all the search
    // can distinguish while keeping the enumeration finite.
    let mut slots = vec![None::<usize>; area];
    slots[0] = Some(0);
    for (i, &tile) in group.tiles().iter().enumerate() {
        slots[tile as usize] = Some(i + 1);
    }
    let tracked = group.len() + 1;

    let solved = Puzzle::solved(size);
    let mut pattern = vec![0u8; area];

    let mut table = HashMap::new();
    table.insert(pattern_key(&solved, group, packing, &mut pattern), 0u8);

    let mut visited = HashSet::new();
    visited.insert(positions_key(&solved, &slots, tracked, packing));

    let mut queue = VecDeque::new();
    queue.push_back((solved, 0u8, None::<Direction>));

    while let Some((state, group_moves, last)) = queue.pop_front() {
        for dir in Direction::ALL {
            // Undoing the previous move can never reach anything new.
            if last == Some(dir.inverse()) {
                continue;
            }

            let Some((next, moved_tile)) = state.apply(dir) else {
                continue;
            };

            if !visited.insert(positions_key(&next, &slots, tracked, packing)) {
                continue;
            }

            if group.contains(moved_tile) {
                let count = group_moves + 1;

                // The BFS is uniform in group moves, so the first time a pattern is reached
                // should already be at its minimum cost; keep the min-update anyway rather than
                // assuming it.
                let entry = table.entry(pattern_key(&next, group, packing, &mut pattern));
                let cost = entry.or_insert(u8::MAX);
                if *cost > count {
                    *cost = count;
                }

                queue.push_back((next, count, Some(dir)));
            } else {
                // Free blank manoeuvre: the pattern is unchanged, but exploring through it may
                // still uncover new patterns.
                queue.push_back((next, group_moves, Some(dir)));
            }
        }
    }

    debug!("built pattern database for group {group}: {} entries", table.len());

    PatternDb::new(group.clone(), table)
}

/// The packed pattern of `state` restricted to `group`: every other tile is zeroed.
fn pattern_key(state: &Puzzle, group: &TileGroup, packing: &Packing, buf: &mut [u8]) -> StateKey {
    for (slot, &tile) in buf.iter_mut().zip(state.pieces()) {
        *slot = if group.contains(tile) { tile } else { 0 };
    }
    packing.compress_pieces(buf)
}

/// Packs the positions of the blank and the group tiles, in slot order.
fn positions_key(
    state: &Puzzle,
    slots: &[Option<usize>],
    tracked: usize,
    packing: &Packing,
) -> u128 {
    let mut positions = [0u8; 32];
    for (i, &tile) in state.pieces().iter().enumerate() {
        if let Some(slot) = slots[tile as usize] {
            positions[slot] = i as u8;
        }
    }

    positions[..tracked]
        .iter()
        .fold(0, |key, &pos| (key << packing.bits_per_value()) | u128::from(pos))
}
