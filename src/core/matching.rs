//! Match detection.
//!
//! A match anchors at a seed position and extends along the row and/or the
//! column. Both axes can qualify at once (a cross or T); the merged value
//! then accounts for every tile in the combined run.

use std::collections::HashSet;

use crate::core::grid::Grid;
use crate::types::{Position, MIN_MATCH};

/// A detected match: the seed it anchors at, the other positions in its
/// qualifying runs, and the value the seed merges to.
///
/// `others` never contains the origin, and the two axes contribute disjoint
/// positions. Non-empty `others` implies a run of at least [`MIN_MATCH`]
/// along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub origin: Position,
    pub others: Vec<Position>,
    pub value: u8,
}

impl Matched {
    /// Points awarded when this match resolves.
    ///
    /// Saturates at `u64::MAX` once the merged value outgrows the 2^63
    /// representable ceiling.
    pub fn points(&self) -> u64 {
        1u64.checked_shl(u32::from(self.value)).unwrap_or(u64::MAX)
    }

    /// The origin followed by the other matched positions.
    pub fn all_positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.origin).chain(self.others.iter().copied())
    }
}

/// Collect positions outward from `seed` while their value equals the seed's,
/// stopping at the grid edge or the first mismatch.
fn walk(grid: &Grid, seed: Position, dr: isize, dc: isize, out: &mut Vec<Position>) {
    let target = grid.at(seed);
    let (mut row, mut col) = (seed.0 as isize, seed.1 as isize);
    loop {
        row += dr;
        col += dc;
        if row < 0 || col < 0 {
            return;
        }
        let pos = (row as usize, col as usize);
        if !grid.contains(pos) || grid.at(pos) != target {
            return;
        }
        out.push(pos);
    }
}

/// Detect a match anchored at `seed`, if any.
///
/// The vertical run is 1 (the seed) + up-run + down-run; horizontal likewise
/// with left/right. An axis qualifies at [`MIN_MATCH`]; both axes may
/// qualify together. Merged value = seed value + matched positions - 1.
pub fn matched(grid: &Grid, seed: Position) -> Option<Matched> {
    let mut up = Vec::new();
    let mut down = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();
    walk(grid, seed, -1, 0, &mut up);
    walk(grid, seed, 1, 0, &mut down);
    walk(grid, seed, 0, -1, &mut left);
    walk(grid, seed, 0, 1, &mut right);

    let mut others = Vec::new();
    if 1 + up.len() + down.len() >= MIN_MATCH {
        others.extend(up);
        others.extend(down);
    }
    if 1 + left.len() + right.len() >= MIN_MATCH {
        others.extend(left);
        others.extend(right);
    }
    if others.is_empty() {
        return None;
    }

    // Saturate rather than wrap: explicit grids may carry values near the
    // top of u8.
    let value = grid.at(seed).saturating_add(others.len() as u8 - 1);
    Some(Matched {
        origin: seed,
        others,
        value,
    })
}

/// Every match on the grid, seeds visited in row-major order.
pub fn all_matches(grid: &Grid) -> Vec<Matched> {
    grid.positions()
        .filter_map(|seed| matched(grid, seed))
        .collect()
}

/// Reduce `matches` to a non-overlapping set, highest merged value first.
///
/// Matches are taken in descending value order (the sort is stable, so
/// equal-value matches keep their row-major seed order); a match is skipped
/// when any of its cells, origin included, was already claimed by an earlier
/// accepted match.
pub fn unique_matches(mut matches: Vec<Matched>) -> Vec<Matched> {
    matches.sort_by(|a, b| b.value.cmp(&a.value));

    let mut seen: HashSet<Position> = HashSet::new();
    let mut unique = Vec::new();
    for m in matches {
        if m.all_positions().any(|pos| seen.contains(&pos)) {
            continue;
        }
        seen.extend(m.all_positions());
        unique.push(m);
    }
    unique
}

/// True if swapping `seed` and `targ` would create a match at either end.
///
/// The grid is swapped, probed, and swapped back; no net mutation.
pub fn swap_matches(grid: &mut Grid, seed: Position, targ: Position) -> bool {
    grid.swap(seed, targ);
    let hit = matched(grid, seed).is_some() || matched(grid, targ).is_some();
    grid.swap(seed, targ);
    hit
}
