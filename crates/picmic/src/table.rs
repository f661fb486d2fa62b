//! Loader for the tab-separated address table.
//!
//! One cell per line: `col row n label`, where `n` is the cell's running
//! number (ignored) and `label` is `Y12`, `Y(12)` or `Y[12]`. Blank lines and
//! lines starting with `#` are skipped.

use log::{debug, warn};
use picmic_core::{
    AddressTable, Hit, LabelParseError, LineLabel, LookupTable, TableError, SENSOR_COLS,
    SENSOR_ROWS,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Dimensions of the address table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableShape {
    pub rows: usize,
    pub cols: usize,
}

impl Default for TableShape {
    fn default() -> Self {
        Self {
            rows: SENSOR_ROWS,
            cols: SENSOR_COLS,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TableLoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `col row n label`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    Label {
        line: usize,
        #[source]
        source: LabelParseError,
    },
    #[error("line {line}: {source}")]
    Cell {
        line: usize,
        #[source]
        source: TableError,
    },
}

/// Read an address table from disk.
pub fn load_table(path: impl AsRef<Path>, shape: TableShape) -> Result<LookupTable, TableLoadError> {
    let raw = fs::read_to_string(path)?;
    parse_table(&raw, shape)
}

/// Parse the text of an address table.
///
/// A cell listed twice keeps its last label.
pub fn parse_table(text: &str, shape: TableShape) -> Result<LookupTable, TableLoadError> {
    let mut table = LookupTable::new(shape.rows, shape.cols);
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let [col, row, _n, label] = fields[..] else {
            return Err(TableLoadError::Malformed {
                line,
                text: raw.to_string(),
            });
        };
        let col = number(line, "col", col)?;
        let hit = Hit::new(number(line, "row", row)?, col);
        let label: LineLabel = label
            .parse()
            .map_err(|source| TableLoadError::Label { line, source })?;

        if let Some(previous) = table.label_of(hit) {
            warn!(
                "line {line}: cell ({}, {}) relabelled from {previous} to {label}",
                hit.row, hit.col
            );
        }
        table
            .set(hit, label)
            .map_err(|source| TableLoadError::Cell { line, source })?;
    }
    debug!(
        "address table: {} of {}x{} cells labelled",
        table.filled(),
        table.rows(),
        table.cols()
    );
    Ok(table)
}

fn number(line: usize, field: &'static str, value: &str) -> Result<usize, TableLoadError> {
    value.parse().map_err(|_| TableLoadError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
