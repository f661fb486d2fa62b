//! Core types for PICMIC line and cluster reconstruction.
//!
//! The PICMIC sensor reads out fired cells as `(row, col)` pairs. Each cell
//! belongs to a strip of one of three orientations (Y at 0°, B at 60°,
//! R at 30°), given by an address table. This crate holds the shared
//! vocabulary: orientations and labels, the address-table abstraction, the
//! bounded per-event containers, and a small stderr logger. The algorithms
//! live in `picmic-clusters`.
//!
//! Normalized strip indices follow this sensor map; at every Y/B/R triple
//! crossing `-1 <= y - b - r <= 1`:
//!
//! ```text
//!                  (427,851)      Y851      (851,851)
//!                          +---------------+
//!                         / \             / \
//!                   R424 /   \     R0    /   \ B851
//!                       /     \         /     \
//!                      /  Y424 \       /       \
//!            (0,424)  +---------------*---------+ (851,424)
//!                      \       /       \       /
//!                    B0 \     /    B427 \     / R-427
//!                        \   /           \   /
//!                         \ /     Y0      \ /
//!                          +---------------+
//!                      (0,0)             (427,0)
//! ```

mod address;
mod bounded;
mod event;
mod label;
mod logger;
mod orientation;

pub use address::{AddressTable, Hit, LookupTable, TableError, SENSOR_COLS, SENSOR_ROWS};
pub use bounded::{BoundedVec, CapacityError};
pub use event::{
    Cluster, Edge, EventClusters, EventFatLines, EventLines, FatLine, MAX_CLUSTER_EDGES,
};
pub use label::{LabelParseError, LineLabel};
pub use orientation::{Orientation, OrientationSet};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
