//! A deterministic match-3 merge engine.
//!
//! Tiles carry small integer values. Swapping two adjacent tiles is legal
//! when it lines up at least three equal values through either swapped
//! position; the matched seed merges to a higher value worth `2^value`
//! points, its partners vanish, survivors fall, and fresh tiles refill from
//! a seeded random source. Cascades resolve until the board is stable.
//!
//! Everything is reproducible from the seed, so games can be replayed and
//! searched move by move.
//!
//! ```
//! use tilematch::Board;
//!
//! let mut board = Board::new((8, 8), Some(12345))?;
//! assert!(board.is_stable());
//!
//! if let Some((seed, targ)) = board.automove_hint() {
//!     let points = board.attempt_swap(seed, targ);
//!     assert!(points > 0);
//!     assert!(board.is_stable());
//! }
//! # Ok::<(), tilematch::EngineError>(())
//! ```

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{Board, Grid, Move};
pub use crate::error::EngineError;
