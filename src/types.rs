//! Shared engine types and constants.
//! This module contains pure data types with no external dependencies.

/// Minimum run length along a row or column that forms a match.
pub const MIN_MATCH: usize = 3;

/// Largest value drawn for freshly generated tile values.
pub const MAX_INIT_VALUE: u8 = 4;

/// Shape used when a caller has no preference.
pub const DEFAULT_SHAPE: Shape = (8, 8);

/// Stabilizer passes that use the offset-reroll formula before switching
/// to full re-randomization of matched seeds.
pub const STABLE_REROLL_PASSES: usize = 32;

/// Hard ceiling on stabilizer passes.
pub const STABLE_MAX_PASSES: usize = 256;

/// Safety bound on cascade resolution passes.
pub const CASCADE_MAX_PASSES: usize = 4096;

/// A cell location as (row, col); (0, 0) is the upper-left corner.
pub type Position = (usize, usize);

/// Board dimensions as (rows, cols).
pub type Shape = (usize, usize);

/// Return true if `a` and `b` are cardinal neighbors.
pub fn adjacent(a: Position, b: Position) -> bool {
    (a.0 == b.0 && a.1.abs_diff(b.1) == 1) || (a.1 == b.1 && a.0.abs_diff(b.0) == 1)
}
