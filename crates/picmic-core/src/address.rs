//! Sensor cells and the cell → line address table.

use crate::LineLabel;
use serde::{Deserialize, Serialize};

/// Number of pixel rows on the PICMIC0 sensor.
pub const SENSOR_ROWS: usize = 128;
/// Number of pixel columns on the PICMIC0 sensor.
pub const SENSOR_COLS: usize = 54;

/// One fired sensor cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hit {
    pub row: usize,
    pub col: usize,
}

impl Hit {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Read-only mapping from a cell to the line it belongs to.
pub trait AddressTable {
    /// Label of the cell, `None` when the cell is outside the table or unset.
    fn label_of(&self, hit: Hit) -> Option<LineLabel>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} table")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Dense in-memory address table.
#[derive(Clone, Debug)]
pub struct LookupTable {
    rows: usize,
    cols: usize,
    labels: Vec<Option<LineLabel>>,
}

impl LookupTable {
    /// Empty table with every cell unset.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            labels: vec![None; rows * cols],
        }
    }

    /// Empty table with the PICMIC0 dimensions.
    pub fn sensor() -> Self {
        Self::new(SENSOR_ROWS, SENSOR_COLS)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set(&mut self, hit: Hit, label: LineLabel) -> Result<(), TableError> {
        let idx = self.index(hit).ok_or(TableError::OutOfBounds {
            row: hit.row,
            col: hit.col,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.labels[idx] = Some(label);
        Ok(())
    }

    /// Number of cells that carry a label.
    pub fn filled(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }

    #[inline]
    fn index(&self, hit: Hit) -> Option<usize> {
        (hit.row < self.rows && hit.col < self.cols).then(|| hit.row * self.cols + hit.col)
    }
}

impl AddressTable for LookupTable {
    fn label_of(&self, hit: Hit) -> Option<LineLabel> {
        self.index(hit).and_then(|idx| self.labels[idx])
    }
}

impl<T: AddressTable + ?Sized> AddressTable for &T {
    fn label_of(&self, hit: Hit) -> Option<LineLabel> {
        (**self).label_of(hit)
    }
}
