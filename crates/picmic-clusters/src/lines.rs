//! Hit → line extraction.

use crate::{ClusterParams, DuplicateHits, LineExtractError, Overflow};
use log::{error, warn};
use picmic_core::{AddressTable, EventLines, Hit, LineLabel, Orientation};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Lines of one event plus what was skipped on the way.
#[derive(Clone, Debug, Serialize)]
pub struct LineExtraction {
    pub lines: EventLines,
    /// Hits on non-functional cells.
    pub dummy_hits: usize,
    /// Hits dropped by [`DuplicateHits::SkipRepeated`].
    pub repeated_hits: usize,
    pub overflows: Vec<Overflow>,
}

/// Map every hit to its normalized line and sort each orientation.
///
/// Dummy cells are skipped with a warning. Hits beyond `params.max_hits`
/// and lines beyond `params.max_lines` per orientation are dropped and
/// reported as [`Overflow`]. A hit without a table entry aborts extraction.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(hits, table, params), fields(hits = hits.len()))
)]
pub fn extract_lines<T: AddressTable + ?Sized>(
    hits: &[Hit],
    table: &T,
    params: &ClusterParams,
) -> Result<LineExtraction, LineExtractError> {
    let mut lines = EventLines::new(params.max_lines);
    let mut overflows = Vec::new();
    let mut dummy_hits = 0usize;
    let mut repeated_hits = 0usize;

    let accepted = if hits.len() > params.max_hits {
        let overflow = Overflow::Hits {
            capacity: params.max_hits,
            dropped: hits.len() - params.max_hits,
        };
        error!("{overflow}");
        overflows.push(overflow);
        &hits[..params.max_hits]
    } else {
        hits
    };

    let mut previous: Option<Hit> = None;
    for &hit in accepted {
        if params.duplicate_hits == DuplicateHits::SkipRepeated && previous == Some(hit) {
            warn!("for ({}, {}), repeated hit, skipped", hit.row, hit.col);
            repeated_hits += 1;
            continue;
        }
        previous = Some(hit);

        let label = table
            .label_of(hit)
            .ok_or(LineExtractError::UnknownCell(hit))?;
        let (orientation, value) = match label {
            LineLabel::Dummy { .. } => {
                warn!("for ({}, {}), this is a dummy cell, skipped", hit.row, hit.col);
                dummy_hits += 1;
                continue;
            }
            LineLabel::Line { .. } => label
                .normalized()
                .ok_or(LineExtractError::StripOutOfRange { hit, label })?,
        };

        if lines.get_mut(orientation).push(value).is_err() {
            record_line_overflow(&mut overflows, orientation, params.max_lines);
        }
    }

    lines.sort();

    Ok(LineExtraction {
        lines,
        dummy_hits,
        repeated_hits,
        overflows,
    })
}

fn record_line_overflow(overflows: &mut Vec<Overflow>, orientation: Orientation, capacity: usize) {
    let overflow = Overflow::Lines {
        orientation,
        capacity,
    };
    if !overflows.contains(&overflow) {
        error!("{overflow}");
        overflows.push(overflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{dummy, hit, table};
    use picmic_core::{LookupTable, Orientation::*};

    #[test]
    fn offsets_and_sorting() {
        let table = table();
        let hits = [hit(Y, 7), hit(R, -3), hit(Y, 2), hit(B, 5), hit(R, -10)];
        let out = extract_lines(&hits, &table, &ClusterParams::default()).unwrap();
        assert_eq!(&out.lines.ylines[..], &[2, 7]);
        assert_eq!(&out.lines.blines[..], &[5]);
        assert_eq!(&out.lines.rlines[..], &[-10, -3]);
        assert!(out.overflows.is_empty());
    }

    #[test]
    fn result_does_not_depend_on_hit_order() {
        let table = table();
        let hits = vec![hit(Y, 9), hit(B, 1), hit(R, 4), hit(Y, 3), hit(B, 0), hit(R, -8)];
        let mut reversed = hits.clone();
        reversed.reverse();
        let params = ClusterParams::default();
        let a = extract_lines(&hits, &table, &params).unwrap();
        let b = extract_lines(&reversed, &table, &params).unwrap();
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn table_offsets_give_triple_crossing_invariant() {
        // Strips through the sensor centre in table numbering.
        let mut table = LookupTable::new(1, 3);
        for (col, label) in ["Y425", "B426", "R427"].iter().enumerate() {
            table
                .set(Hit::new(0, col), label.parse().unwrap())
                .unwrap();
        }
        let hits = [Hit::new(0, 0), Hit::new(0, 1), Hit::new(0, 2)];
        let out = extract_lines(&hits, &table, &ClusterParams::default()).unwrap();
        let (y, b, r) = (out.lines.ylines[0], out.lines.blines[0], out.lines.rlines[0]);
        assert!((-1..=1).contains(&(y - b - r)), "y={y} b={b} r={r}");
    }

    #[test]
    fn dummy_cells_are_skipped_and_counted() {
        let table = table();
        let hits = [dummy(4), hit(Y, 1), dummy(5)];
        let out = extract_lines(&hits, &table, &ClusterParams::default()).unwrap();
        assert_eq!(out.dummy_hits, 2);
        assert_eq!(out.lines.len(), 1);
    }

    #[test]
    fn duplicates_are_kept_by_default() {
        let table = table();
        let hits = [hit(Y, 4), hit(Y, 4)];
        let out = extract_lines(&hits, &table, &ClusterParams::default()).unwrap();
        assert_eq!(&out.lines.ylines[..], &[4, 4]);
        assert_eq!(out.repeated_hits, 0);
    }

    #[test]
    fn repeated_hits_can_be_skipped() {
        let table = table();
        let params = ClusterParams {
            duplicate_hits: DuplicateHits::SkipRepeated,
            ..ClusterParams::default()
        };
        let hits = [hit(Y, 4), hit(Y, 4), hit(B, 1), hit(Y, 4)];
        let out = extract_lines(&hits, &table, &params).unwrap();
        // Only the consecutive repeat is dropped.
        assert_eq!(&out.lines.ylines[..], &[4, 4]);
        assert_eq!(out.repeated_hits, 1);
    }

    #[test]
    fn unknown_cell_is_fatal() {
        let table = table();
        let hits = [hit(Y, 1), Hit::new(99, 0)];
        let err = extract_lines(&hits, &table, &ClusterParams::default()).unwrap_err();
        assert_eq!(err, LineExtractError::UnknownCell(Hit::new(99, 0)));
    }

    #[test]
    fn out_of_range_strip_is_fatal() {
        let mut table = table();
        let corrupt = LineLabel::Line {
            orientation: Y,
            strip: i32::MIN,
        };
        table.set(Hit::new(0, 3), corrupt).unwrap();
        let hits = [hit(B, 1), Hit::new(0, 3)];
        let err = extract_lines(&hits, &table, &ClusterParams::default()).unwrap_err();
        assert_eq!(
            err,
            LineExtractError::StripOutOfRange {
                hit: Hit::new(0, 3),
                label: corrupt
            }
        );
    }

    #[test]
    fn too_many_hits_truncates_at_the_cap() {
        let table = table();
        let params = ClusterParams {
            max_hits: 3,
            ..ClusterParams::default()
        };
        let hits: Vec<Hit> = (0..5).map(|v| hit(B, v)).collect();
        let out = extract_lines(&hits, &table, &params).unwrap();
        assert_eq!(&out.lines.blines[..], &[0, 1, 2]);
        assert_eq!(
            out.overflows,
            vec![Overflow::Hits {
                capacity: 3,
                dropped: 2
            }]
        );
    }

    #[test]
    fn full_orientation_is_reported_once() {
        let table = table();
        let params = ClusterParams {
            max_lines: 2,
            ..ClusterParams::default()
        };
        let hits: Vec<Hit> = (0..5).map(|v| hit(R, v)).chain([hit(Y, 0)]).collect();
        let out = extract_lines(&hits, &table, &params).unwrap();
        assert_eq!(&out.lines.rlines[..], &[0, 1]);
        assert_eq!(&out.lines.ylines[..], &[0]);
        assert_eq!(
            out.overflows,
            vec![Overflow::Lines {
                orientation: R,
                capacity: 2
            }]
        );
    }
}
