use picmic_core::{Hit, LineLabel, Orientation};
use serde::Serialize;

/// Fatal extraction error: the address table has no usable label for a hit.
///
/// The table is fixed configuration, so this points at a corrupt table or a
/// hit outside the sensor rather than at bad event data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineExtractError {
    #[error("no address-table entry for cell ({}, {})", .0.row, .0.col)]
    UnknownCell(Hit),
    #[error("cell ({}, {}) has label {label} with a strip outside the sensor", .hit.row, .hit.col)]
    StripOutOfRange { hit: Hit, label: LineLabel },
}

/// A bounded buffer refused data; the event is analysed with what fits.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overflow {
    #[error("event too large: {dropped} hits beyond the {capacity} hit limit ignored")]
    Hits { capacity: usize, dropped: usize },
    #[error("more than {capacity} {orientation} lines, event can't be correctly analysed")]
    Lines {
        orientation: Orientation,
        capacity: usize,
    },
    #[error("more than {capacity} {orientation} fat lines, event can't be correctly analysed")]
    FatLines {
        orientation: Orientation,
        capacity: usize,
    },
    #[error("more than {capacity} clusters, event can't be correctly analysed")]
    Clusters { capacity: usize },
}
