//! High-level facade crate for the `picmic-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core types and of the clustering pipeline
//! - readers for the address-table and event text formats
//! - JSON configuration and per-event report helpers
//! - the `picmic` command-line driver (feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use picmic::{load_table, ClusterPipeline, EventReader, PicmicConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PicmicConfig::default();
//! let table = load_table("picmic_adress_table.tab", config.table)?;
//! let pipeline = ClusterPipeline::new(config.params)?;
//!
//! for record in EventReader::open("events.txt")? {
//!     let record = record?;
//!     let report = pipeline.process(&table, &record.hits)?;
//!     println!("event {}: {}", record.number, report.clusters);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `picmic::core`: orientations, labels, hits, bounded containers, address tables.
//! - `picmic::clusters`: the three reconstruction stages and the line-packet codec.

pub use picmic_clusters as clusters;
pub use picmic_core as core;

pub use picmic_clusters::{ClusterParams, ClusterPipeline, EventReport, Overflow};
pub use picmic_core::{AddressTable, Hit, LineLabel, LookupTable, Orientation};

mod events;
mod io;
mod table;

pub use events::{parse_events, EventParseError, EventReader, EventRecord};
pub use io::{EventFailure, EventOutput, IoError, PicmicConfig};
pub use table::{load_table, parse_table, TableLoadError, TableShape};
