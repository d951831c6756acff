//! Core engine: grid storage, match detection, swap resolution, snapshots.

pub mod board;
pub mod grid;
pub mod matching;
pub mod rng;
pub mod snapshot;

pub use board::{Board, Move};
pub use grid::Grid;
pub use matching::{all_matches, matched, unique_matches, Matched};
pub use rng::SimpleRng;
pub use snapshot::{BoardSnapshot, Checkpoint, Frame, StepRecorder};
