//! JSON configuration and report helpers.

use crate::TableShape;
use picmic_clusters::{ClusterParams, EventReport};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Run configuration; every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PicmicConfig {
    pub params: ClusterParams,
    pub table: TableShape,
}

impl PicmicConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// JSON record written for one event.
#[derive(Debug, Serialize)]
pub struct EventOutput<'a> {
    pub event: usize,
    pub declared_hits: usize,
    pub hits: usize,
    #[serde(flatten)]
    pub report: &'a EventReport,
}

/// JSON record written in place of an event that could not be analysed.
#[derive(Debug, Serialize)]
pub struct EventFailure {
    pub event: usize,
    /// Line of the event file.
    pub line: usize,
    pub error: String,
}
