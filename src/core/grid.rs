//! Grid module - dense 2D tile value storage
//!
//! Values are stored in a flat row-major array for cache locality.
//! Coordinates: (row, col) where row 0 is the top of the board. A value of 0
//! marks a transiently empty cell during resolution; live tiles are >= 1 and
//! worth 2^value points.

use std::collections::HashSet;
use std::fmt;

use crate::error::EngineError;
use crate::types::{Position, Shape};

/// A dense rectangular grid of tile values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of values, row-major order (row * cols + col)
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid of `shape` with every cell set to `value`.
    pub fn filled(shape: Shape, value: u8) -> Self {
        Self {
            rows: shape.0,
            cols: shape.1,
            cells: vec![value; shape.0 * shape.1],
        }
    }

    /// Build from explicit rows (for tests and replays).
    ///
    /// Panics when the rows are ragged; an explicit grid is always
    /// programmer-provided, so a malformed one is a programmer error.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == ncols),
            "grid rows must all have the same length"
        );
        let mut cells = Vec::with_capacity(nrows * ncols);
        for row in rows {
            cells.extend_from_slice(row);
        }
        Self {
            rows: nrows,
            cols: ncols,
            cells,
        }
    }

    /// Calculate flat index from a position; panics when out of bounds.
    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {:?} outside {}x{} grid",
            pos,
            self.rows,
            self.cols
        );
        pos.0 * self.cols + pos.1
    }

    /// Board dimensions as (rows, cols).
    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    /// Value at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<u8> {
        if self.contains(pos) {
            Some(self.cells[pos.0 * self.cols + pos.1])
        } else {
            None
        }
    }

    /// Value at `pos`; panics when out of bounds.
    pub fn at(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    /// Set the value at `pos`; panics when out of bounds.
    pub fn set(&mut self, pos: Position, value: u8) {
        let idx = self.index(pos);
        self.cells[idx] = value;
    }

    /// Unconditionally exchange the values at `a` and `b`.
    ///
    /// This is a primitive with no legality check; the move engine layers
    /// adjacency and match rules on top of it.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }

    /// Flat row-major view of the cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Remove the `doomed` cells and let survivors fall, column by column.
    ///
    /// Survivors keep their relative vertical order. The returned positions
    /// are the now-empty cells at the top of each affected column, reported
    /// top row first with columns left to right; callers must refill them in
    /// exactly that order to keep refill draws deterministic.
    pub fn compact(&mut self, doomed: &HashSet<Position>) -> Vec<Position> {
        let mut emptied = Vec::with_capacity(doomed.len());

        for col in 0..self.cols {
            // Two-pointer scan from the bottom: survivors slide down past
            // doomed cells.
            let mut write = self.rows;
            for read in (0..self.rows).rev() {
                if doomed.contains(&(read, col)) {
                    continue;
                }
                write -= 1;
                if write != read {
                    self.cells[write * self.cols + col] = self.cells[read * self.cols + col];
                }
            }

            for row in 0..write {
                self.cells[row * self.cols + col] = 0;
                emptied.push((row, col));
            }
        }

        emptied
    }

    /// Serialize as `"<ncols> <letters>"` with `'A'` = 1, letters row-major.
    ///
    /// Only values 1..=26 are representable; a transiently empty (0) or
    /// over-merged cell is an error, so only stable boards encode.
    pub fn encode(&self) -> Result<String, EngineError> {
        let mut out = String::with_capacity(self.cells.len() + 8);
        out.push_str(&self.cols.to_string());
        out.push(' ');
        for &value in &self.cells {
            if !(1..=26).contains(&value) {
                return Err(EngineError::ValueOverflow(value));
            }
            out.push((b'A' + value - 1) as char);
        }
        Ok(out)
    }

    /// Parse the [`Grid::encode`] format back into a grid.
    pub fn decode(text: &str) -> Result<Self, EngineError> {
        let (head, letters) = text.split_once(' ').ok_or(EngineError::EmptyEncoding)?;
        let cols: usize = head
            .parse()
            .map_err(|_| EngineError::BadDimension(head.to_string()))?;
        if cols == 0 {
            return Err(EngineError::BadDimension(head.to_string()));
        }
        if letters.is_empty() || letters.len() % cols != 0 {
            return Err(EngineError::RaggedEncoding {
                cells: letters.len(),
                cols,
            });
        }

        let mut cells = Vec::with_capacity(letters.len());
        for ch in letters.chars() {
            if !ch.is_ascii_uppercase() {
                return Err(EngineError::BadCell(ch));
            }
            cells.push(ch as u8 - b'A' + 1);
        }

        Ok(Self {
            rows: cells.len() / cols,
            cols,
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[row * self.cols + col])?;
            }
        }
        Ok(())
    }
}
