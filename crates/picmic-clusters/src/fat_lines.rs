//! Per-orientation 1-D clustering of lines into fat lines.
//!
//! Grouping nearby lines first keeps the intersection stage from exploding
//! combinatorially: a dense band of hits becomes one interval instead of
//! dozens of individual lines.

use crate::{ClusterParams, Overflow};
use log::error;
use picmic_core::{BoundedVec, EventFatLines, EventLines, FatLine, Orientation};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fat lines of one event plus the orientations that ran out of room.
#[derive(Clone, Debug, Serialize)]
pub struct FatLineExtraction {
    pub fat_lines: EventFatLines,
    pub overflows: Vec<Overflow>,
}

/// Merge the sorted lines of every orientation into fat lines.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(lines = lines.len()))
)]
pub fn build_fat_lines(lines: &EventLines, params: &ClusterParams) -> FatLineExtraction {
    let mut fat_lines = EventFatLines::new(params.max_fat_lines);
    let mut overflows = Vec::new();
    for o in Orientation::ALL {
        if let Err(overflow) = merge_lines(o, lines.get(o), params.fatline_cut, fat_lines.get_mut(o))
        {
            error!("{overflow}");
            overflows.push(overflow);
        }
    }
    FatLineExtraction {
        fat_lines,
        overflows,
    }
}

/// Greedy single-pass merge of ascending `lines` into `out`.
///
/// A line joins the current interval when it is less than `cut` away from
/// the interval's last line. When `out` is full, merging stops and the fat
/// lines built so far are kept.
pub fn merge_lines(
    orientation: Orientation,
    lines: &[i32],
    cut: i32,
    out: &mut BoundedVec<FatLine>,
) -> Result<(), Overflow> {
    let Some((&head, tail)) = lines.split_first() else {
        return Ok(());
    };

    let (mut first, mut last, mut nline) = (head, head, 1usize);
    for &v in tail {
        debug_assert!(v >= last, "lines must be sorted");
        if v - last < cut {
            last = v;
            nline += 1;
        } else {
            close(orientation, out, first, last, nline)?;
            (first, last, nline) = (v, v, 1);
        }
    }
    close(orientation, out, first, last, nline)
}

fn close(
    orientation: Orientation,
    out: &mut BoundedVec<FatLine>,
    first: i32,
    last: i32,
    nline: usize,
) -> Result<(), Overflow> {
    out.push(FatLine::new(first, last, nline))
        .map_err(|e| Overflow::FatLines {
            orientation,
            capacity: e.capacity,
        })
}
