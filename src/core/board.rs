//! Board module - construction, stabilization, swaps, cascades, enumeration
//!
//! A board owns one grid and one random source and mutates them in place.
//! Every public state-producing operation leaves the grid stable (no run of
//! [`MIN_MATCH`] equal values along any row or column). Illegal swaps are
//! not errors: they return zero points and leave the grid untouched.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::matching::{all_matches, matched, swap_matches, unique_matches, Matched};
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{Checkpoint, StepRecorder};
use crate::error::EngineError;
use crate::types::{
    adjacent, Position, Shape, CASCADE_MAX_PASSES, MAX_INIT_VALUE, MIN_MATCH, STABLE_MAX_PASSES,
    STABLE_REROLL_PASSES,
};

/// A legal swap, the points it scores, and the grid it settles into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub seed: Position,
    pub targ: Position,
    pub points: u64,
    pub grid: Grid,
}

/// A match-3 board: a grid of tile values plus its random source.
///
/// Cloning a board deep-copies both, so a clone replays the exact same
/// refill sequence as the original would have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    rng: SimpleRng,
    seed: u32,
}

impl Board {
    /// Construct a stable board of `shape`, randomized from `seed`.
    ///
    /// A `None` seed is drawn from the system clock. Fails when either
    /// dimension is below the minimum match length.
    pub fn new(shape: Shape, seed: Option<u32>) -> Result<Self, EngineError> {
        let (rows, cols) = shape;
        if rows < MIN_MATCH || cols < MIN_MATCH {
            return Err(EngineError::InvalidShape {
                rows,
                cols,
                min: MIN_MATCH,
            });
        }

        let seed = seed.unwrap_or_else(clock_seed);
        let mut rng = SimpleRng::new(seed);
        let mut grid = Grid::filled(shape, 0);
        for pos in grid.positions() {
            let value = rng.init_value();
            grid.set(pos, value);
        }

        let mut board = Self { grid, rng, seed };
        board.assure_stable();
        Ok(board)
    }

    /// Construct from an explicit grid, skipping stabilization.
    ///
    /// Used by tests and replays; the grid may contain matches, which
    /// [`Board::settle`] will resolve on demand.
    pub fn from_grid(grid: Grid, seed: u32) -> Result<Self, EngineError> {
        let (rows, cols) = grid.shape();
        if rows < MIN_MATCH || cols < MIN_MATCH {
            return Err(EngineError::InvalidShape {
                rows,
                cols,
                min: MIN_MATCH,
            });
        }
        Ok(Self {
            grid,
            rng: SimpleRng::new(seed),
            seed,
        })
    }

    /// The seed this board's random source started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn shape(&self) -> Shape {
        self.grid.shape()
    }

    /// Value at `pos`, or `None` when out of bounds.
    pub fn value_at(&self, pos: Position) -> Option<u8> {
        self.grid.get(pos)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        self.grid.positions()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// True when the grid holds no match.
    pub fn is_stable(&self) -> bool {
        all_matches(&self.grid).is_empty()
    }

    /// Refill emptied cells in the order gravity reported them.
    fn refill(&mut self, empties: &[Position]) {
        for &pos in empties {
            let value = self.rng.init_value();
            self.grid.set(pos, value);
        }
    }

    /// Reroll matched seeds until the grid holds no match.
    ///
    /// Each pass rerolls every current match origin, which converges in a
    /// few passes in practice. The offset-reroll formula is not proven to
    /// terminate, so after [`STABLE_REROLL_PASSES`] it switches to full
    /// re-randomization, and exhausting [`STABLE_MAX_PASSES`] falls back to
    /// a striped pattern with no equal cardinal neighbors.
    fn assure_stable(&mut self) {
        let wheel = (MAX_INIT_VALUE - 1) as u32;

        for pass in 0..STABLE_MAX_PASSES {
            let matches = all_matches(&self.grid);
            if matches.is_empty() {
                return;
            }
            for m in matches {
                let value = self.grid.at(m.origin);
                let fresh = if pass < STABLE_REROLL_PASSES {
                    // New value offset from the current one, wrapped into
                    // [1, MAX_INIT_VALUE - 1].
                    let draw = self.rng.next_range(wheel) as u8 + 1;
                    (value + draw - 1) % (MAX_INIT_VALUE - 1) + 1
                } else {
                    self.rng.init_value()
                };
                self.grid.set(m.origin, fresh);
            }
        }

        // Rerolling never converged. Stripes change value between any two
        // cardinal neighbors, so the result has no matches at all.
        for pos in self.grid.positions() {
            self.grid.set(pos, ((pos.0 + 2 * pos.1) % 3) as u8 + 1);
        }
    }

    /// Attempt to swap `seed` and `targ`, returning the points earned.
    ///
    /// Zero means the move was illegal (out of bounds, non-adjacent, or no
    /// match at either endpoint) and the grid is observably unchanged. A
    /// legal swap merges the matched endpoints, applies gravity and refill,
    /// resolves any cascade, and leaves the grid stable.
    pub fn attempt_swap(&mut self, seed: Position, targ: Position) -> u64 {
        self.swap_and_resolve(seed, targ, &mut |_, _, _| {})
    }

    /// Like [`Board::attempt_swap`], recording a snapshot at each checkpoint.
    pub fn attempt_swap_recorded(
        &mut self,
        seed: Position,
        targ: Position,
        recorder: &mut StepRecorder,
    ) -> u64 {
        self.swap_and_resolve(seed, targ, &mut |checkpoint, grid, points| {
            recorder.record(checkpoint, grid, points)
        })
    }

    /// True if swapping `seed` and `targ` would be a legal move.
    ///
    /// Probes a cloned grid with a swap/test/unswap, so the board itself is
    /// untouched.
    pub fn can_swap(&self, seed: Position, targ: Position) -> bool {
        if !self.grid.contains(seed) || !self.grid.contains(targ) || !adjacent(seed, targ) {
            return false;
        }
        let mut probe = self.grid.clone();
        swap_matches(&mut probe, seed, targ)
    }

    /// Resolve any pre-existing matches and return the points earned.
    ///
    /// Boards built with [`Board::from_grid`] may start unstable; this is
    /// the repeat-until-quiescent resolver that swaps also defer to.
    pub fn settle(&mut self) -> u64 {
        self.resolve_combos(0, &mut |_, _, _| {})
    }

    /// Lazily enumerate every legal move with its score and resulting grid.
    ///
    /// Seeds are visited in row-major order and probed against their up and
    /// left neighbors, so each unordered pair appears exactly once. Each
    /// candidate runs the full swap on a cloned board; consuming the
    /// sequence never disturbs this board, and it is recomputed fresh on
    /// every call.
    pub fn possible_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.grid
            .positions()
            .flat_map(|seed| probe_targets(seed).into_iter().map(move |targ| (seed, targ)))
            .filter_map(move |(seed, targ)| {
                let mut probe = self.clone();
                let points = probe.attempt_swap(seed, targ);
                (points > 0).then(|| Move {
                    seed,
                    targ,
                    points,
                    grid: probe.grid,
                })
            })
    }

    /// First legal (seed, targ) pair in enumeration order, if any.
    ///
    /// A cheaper existence probe than [`Board::possible_moves`]: one cloned
    /// grid, no scoring, no resolution.
    pub fn automove_hint(&self) -> Option<(Position, Position)> {
        let mut probe = self.grid.clone();
        for seed in self.grid.positions() {
            for targ in probe_targets(seed) {
                if swap_matches(&mut probe, seed, targ) {
                    return Some((seed, targ));
                }
            }
        }
        None
    }

    fn swap_and_resolve(
        &mut self,
        seed: Position,
        targ: Position,
        observe: &mut dyn FnMut(Checkpoint, &Grid, u64),
    ) -> u64 {
        if !self.grid.contains(seed) || !self.grid.contains(targ) || !adjacent(seed, targ) {
            return 0;
        }

        self.grid.swap(seed, targ);

        let mut found: ArrayVec<Matched, 2> = ArrayVec::new();
        if let Some(m) = matched(&self.grid, seed) {
            found.push(m);
        }
        if let Some(m) = matched(&self.grid, targ) {
            found.push(m);
        }
        if found.is_empty() {
            // Illegal: restore and report nothing happened.
            self.grid.swap(targ, seed);
            return 0;
        }
        observe(Checkpoint::Swapped, &self.grid, 0);

        // Merge each matched endpoint in place; its run partners are doomed.
        let mut points = 0u64;
        let mut doomed: HashSet<Position> = HashSet::new();
        for m in &found {
            self.grid.set(m.origin, m.value);
            points += m.points();
            doomed.extend(m.others.iter().copied());
        }
        for &pos in &doomed {
            self.grid.set(pos, 0);
        }
        observe(Checkpoint::Merged, &self.grid, points);

        let empties = self.grid.compact(&doomed);
        self.refill(&empties);
        observe(Checkpoint::Settled, &self.grid, points);

        points + self.resolve_combos(points, observe)
    }

    /// Repeatedly merge the non-overlapping, highest-value matches until the
    /// grid is quiescent, returning the points earned here.
    ///
    /// `already` is only reported to the observer so recorded frames carry
    /// the operation's running total.
    fn resolve_combos(
        &mut self,
        already: u64,
        observe: &mut dyn FnMut(Checkpoint, &Grid, u64),
    ) -> u64 {
        let mut earned = 0u64;

        for _ in 0..CASCADE_MAX_PASSES {
            let matches = unique_matches(all_matches(&self.grid));
            if matches.is_empty() {
                return earned;
            }

            let mut doomed: HashSet<Position> = HashSet::new();
            for m in &matches {
                self.grid.set(m.origin, m.value);
                earned += m.points();
                doomed.extend(m.others.iter().copied());
            }
            for &pos in &doomed {
                self.grid.set(pos, 0);
            }
            observe(Checkpoint::Merged, &self.grid, already + earned);

            let empties = self.grid.compact(&doomed);
            self.refill(&empties);
            observe(Checkpoint::Settled, &self.grid, already + earned);
        }

        // Pass bound exhausted; on interactive board sizes this is
        // unreachable in practice.
        earned
    }
}

/// The up and left neighbors of `seed`, so a row-major scan probes each
/// unordered pair exactly once.
fn probe_targets(seed: Position) -> ArrayVec<Position, 2> {
    let mut targets = ArrayVec::new();
    if seed.0 > 0 {
        targets.push((seed.0 - 1, seed.1));
    }
    if seed.1 > 0 {
        targets.push((seed.0, seed.1 - 1));
    }
    targets
}

/// Seed fallback when the caller does not supply one.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Board {
        let grid = Grid::from_rows(&[vec![1, 6, 1], vec![6, 1, 6], vec![1, 6, 1]]);
        Board::from_grid(grid, 7).expect("valid shape")
    }

    #[test]
    fn test_new_board_is_stable() {
        for seed in [1, 2, 42, 12345, 0xDEAD_BEEF] {
            let board = Board::new((8, 8), Some(seed)).expect("valid shape");
            assert!(board.is_stable(), "seed {seed} produced matches");
        }
    }

    #[test]
    fn test_new_rectangular_board() {
        let board = Board::new((5, 9), Some(3)).expect("valid shape");
        assert_eq!(board.shape(), (5, 9));
        assert!(board.is_stable());
        for pos in board.positions() {
            let v = board.value_at(pos).expect("in bounds");
            assert!((1..=MAX_INIT_VALUE).contains(&v));
        }
    }

    #[test]
    fn test_invalid_shape_rejected() {
        assert_eq!(
            Board::new((2, 8), Some(1)),
            Err(EngineError::InvalidShape {
                rows: 2,
                cols: 8,
                min: MIN_MATCH
            })
        );
        assert!(Board::new((8, 2), Some(1)).is_err());
        assert!(Board::new((3, 3), Some(1)).is_ok());
    }

    #[test]
    fn test_from_grid_skips_stabilization() {
        let grid = Grid::from_rows(&[vec![1, 1, 1], vec![2, 3, 2], vec![3, 2, 3]]);
        let board = Board::from_grid(grid, 1).expect("valid shape");
        assert!(!board.is_stable());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::new((8, 8), Some(777)).expect("valid shape");
        let b = Board::new((8, 8), Some(777)).expect("valid shape");
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_non_adjacent_swap_is_rejected() {
        let mut board = diamond();
        let before = board.grid().clone();
        assert_eq!(board.attempt_swap((0, 0), (2, 2)), 0);
        assert_eq!(board.attempt_swap((0, 0), (0, 2)), 0);
        assert_eq!(board.attempt_swap((0, 0), (0, 0)), 0);
        assert_eq!(board.grid(), &before);
    }

    #[test]
    fn test_out_of_bounds_swap_is_rejected() {
        let mut board = diamond();
        let before = board.grid().clone();
        assert_eq!(board.attempt_swap((0, 0), (0, 99)), 0);
        assert_eq!(board.attempt_swap((99, 0), (98, 0)), 0);
        assert_eq!(board.grid(), &before);
    }

    #[test]
    fn test_matchless_swap_restores_grid() {
        let grid = Grid::from_rows(&[vec![1, 2, 3], vec![2, 3, 1], vec![3, 1, 2]]);
        let mut board = Board::from_grid(grid.clone(), 5).expect("valid shape");
        assert_eq!(board.attempt_swap((0, 0), (0, 1)), 0);
        assert_eq!(board.grid(), &grid);
    }

    #[test]
    fn test_legal_swap_scores_and_stabilizes() {
        let mut board = diamond();
        // Moving the center 1 up completes a row of 1s and a row of 6s:
        // 2^(6+2-1) + 2^(1+2-1) = 128 + 4. Seed 7 refills the emptied
        // corners with 3, 2, 1, 4 and nothing re-matches.
        let points = board.attempt_swap((1, 1), (0, 1));
        assert_eq!(points, 132);
        assert_eq!(board.grid().cells(), &[3, 2, 1, 2, 7, 4, 1, 6, 1]);
        assert!(board.is_stable());
    }

    #[test]
    fn test_legal_swap_is_deterministic() {
        let mut a = diamond();
        let mut b = diamond();
        assert_eq!(
            a.attempt_swap((1, 1), (0, 1)),
            b.attempt_swap((1, 1), (0, 1))
        );
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_can_swap_does_not_mutate() {
        let board = diamond();
        let before = board.grid().clone();
        assert!(board.can_swap((1, 1), (0, 1)));
        assert!(board.can_swap((1, 1), (1, 0)));
        assert!(!board.can_swap((0, 0), (0, 1)));
        assert!(!board.can_swap((0, 0), (2, 0)));
        assert!(!board.can_swap((0, 0), (0, 99)));
        assert_eq!(board.grid(), &before);
    }

    #[test]
    fn test_settle_resolves_prebuilt_matches() {
        let grid = Grid::from_rows(&[vec![1, 1, 1], vec![2, 3, 2], vec![3, 2, 3]]);
        let mut board = Board::from_grid(grid, 11).expect("valid shape");
        let points = board.settle();
        // The row of 1s merges to value 2 for 4 points; cascades only add.
        assert!(points >= 4);
        assert!(board.is_stable());
    }

    #[test]
    fn test_automove_hint_finds_first_pair() {
        let board = diamond();
        assert_eq!(board.automove_hint(), Some(((1, 1), (0, 1))));
    }

    #[test]
    fn test_automove_hint_none_when_no_move_exists() {
        // All values distinct: no swap can ever line up three equal tiles.
        let grid = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        let board = Board::from_grid(grid, 1).expect("valid shape");
        assert_eq!(board.automove_hint(), None);
        assert_eq!(board.possible_moves().count(), 0);
    }

    #[test]
    fn test_possible_moves_enumerates_each_pair_once() {
        let board = diamond();
        let moves: Vec<Move> = board.possible_moves().collect();
        // The four swaps into the center are the only legal moves.
        assert_eq!(moves.len(), 4);
        let pairs: Vec<(Position, Position)> = moves.iter().map(|m| (m.seed, m.targ)).collect();
        assert_eq!(
            pairs,
            vec![
                ((1, 1), (0, 1)),
                ((1, 1), (1, 0)),
                ((1, 2), (1, 1)),
                ((2, 1), (1, 1)),
            ]
        );
        // No seed-7 refill re-matches, so every move scores exactly the
        // base 2^7 + 2^2 merge.
        for m in &moves {
            assert_eq!(m.points, 132);
            assert!(all_matches(&m.grid).is_empty());
        }
        // Enumeration never disturbs the board.
        assert_eq!(board.grid(), &diamond().grid().clone());
    }

    #[test]
    fn test_possible_moves_partial_consumption() {
        let board = diamond();
        let first = board.possible_moves().next().expect("legal move exists");
        assert_eq!((first.seed, first.targ), ((1, 1), (0, 1)));
    }

    #[test]
    fn test_clone_replays_identically() {
        let mut board = Board::new((6, 6), Some(31337)).expect("valid shape");
        let mut copy = board.clone();
        for _ in 0..5 {
            let Some((seed, targ)) = board.automove_hint() else {
                break;
            };
            assert_eq!(copy.automove_hint(), Some((seed, targ)));
            assert_eq!(board.attempt_swap(seed, targ), copy.attempt_swap(seed, targ));
            assert_eq!(board.grid(), copy.grid());
        }
    }

    #[test]
    fn test_stabilizer_fallback_pattern_has_no_matches() {
        // The striped fallback itself must honor the stability invariant.
        let mut grid = Grid::filled((8, 8), 0);
        for pos in grid.positions() {
            grid.set(pos, ((pos.0 + 2 * pos.1) % 3) as u8 + 1);
        }
        assert!(all_matches(&grid).is_empty());
    }
}
