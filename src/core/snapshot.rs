//! Board snapshots and step recording.
//!
//! A swap resolves through several grid states before it settles. Recording
//! captures one frame per checkpoint so a caller can replay the resolution
//! for animation or debugging without re-running the engine.

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::types::Shape;

/// Where in a swap's resolution a frame was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    /// The two tiles have been exchanged, nothing resolved yet.
    Swapped,
    /// Matched seeds hold their merged values, partners are zeroed.
    Merged,
    /// Gravity and refill have run; the grid may still hold cascades.
    Settled,
}

/// An owned copy of a grid's cells, detached from the live board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl BoardSnapshot {
    pub fn of(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: grid.cells().to_vec(),
        }
    }

    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Value at (row, col), or `None` when out of bounds.
    pub fn at(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

/// One recorded resolution state with the running points at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub checkpoint: Checkpoint,
    pub snapshot: BoardSnapshot,
    pub points: u64,
}

/// Accumulates frames across one or more recorded swaps.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    frames: Vec<Frame>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, checkpoint: Checkpoint, grid: &Grid, points: u64) {
        self.frames.push(Frame {
            checkpoint,
            snapshot: BoardSnapshot::of(grid),
            points,
        });
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
