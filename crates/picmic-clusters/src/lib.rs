//! Fat-line clustering of PICMIC sensor events.
//!
//! ## Quickstart
//!
//! ```
//! use picmic_clusters::{ClusterParams, ClusterPipeline};
//! use picmic_core::{Hit, LineLabel, LookupTable};
//!
//! // Three cells on strips crossing at the sensor centre.
//! let mut table = LookupTable::new(1, 3);
//! for (col, label) in ["Y425", "B426", "R427"].iter().enumerate() {
//!     table.set(Hit::new(0, col), label.parse::<LineLabel>()?)?;
//! }
//!
//! let pipeline = ClusterPipeline::new(ClusterParams::default())?;
//! let hits = [Hit::new(0, 0), Hit::new(0, 1), Hit::new(0, 2)];
//! let report = pipeline.process(&table, &hits)?;
//! assert_eq!(report.clusters.len(), 1);
//! println!("{}", report.clusters);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Reconstruction runs in three stages:
//! 1. [`extract_lines`]: map every hit to its strip, shift it to the
//!    normalized index and sort each orientation.
//! 2. [`build_fat_lines`]: merge nearby lines of one orientation into
//!    intervals carrying width and density.
//! 3. [`build_clusters`]: intersect fat lines of three orientations, then
//!    fall back to pairs of the fat lines left free.
//!
//! Every buffer is bounded. When one fills up the stage keeps what fits,
//! logs an error and reports an [`Overflow`].

mod clusters;
mod error;
mod fat_lines;
mod lines;
pub mod packet;
mod params;
mod pipeline;

#[cfg(test)]
mod testutil;

pub use clusters::{build_clusters, fat_intersect, triple_intersects, ClusterExtraction};
pub use error::{LineExtractError, Overflow};
pub use fat_lines::{build_fat_lines, merge_lines, FatLineExtraction};
pub use lines::{extract_lines, LineExtraction};
pub use packet::{decode_lines, encode_lines, DecodedLines, PacketError};
pub use params::{ClusterParams, DuplicateHits, ParamsError};
pub use pipeline::{ClusterPipeline, EventReport};
