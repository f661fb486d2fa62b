use crate::{
    build_clusters, build_fat_lines, extract_lines, ClusterParams, LineExtractError, Overflow,
    ParamsError,
};
use log::debug;
use picmic_core::{AddressTable, EventClusters, EventFatLines, EventLines, Hit};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything the pipeline produced for one event.
#[derive(Clone, Debug, Serialize)]
pub struct EventReport {
    pub lines: EventLines,
    /// Fat lines with their `free` flags as left by the cluster builder.
    pub fat_lines: EventFatLines,
    pub clusters: EventClusters,
    pub dummy_hits: usize,
    pub repeated_hits: usize,
    /// Capacity overflows of every stage, in stage order.
    pub overflows: Vec<Overflow>,
}

impl EventReport {
    /// True when some stage dropped data because a buffer was full.
    pub fn is_truncated(&self) -> bool {
        !self.overflows.is_empty()
    }
}

/// Hit list → lines → fat lines → clusters, for one event at a time.
///
/// Holds no per-event state, so one pipeline serves a whole run.
#[derive(Clone, Debug)]
pub struct ClusterPipeline {
    params: ClusterParams,
}

impl ClusterPipeline {
    pub fn new(params: ClusterParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Run the three stages on the hits of one event.
    ///
    /// Only a hit the table cannot resolve is an error; overflows are
    /// collected in the report and the event is analysed with what fits.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, table, hits), fields(hits = hits.len()))
    )]
    pub fn process<T: AddressTable + ?Sized>(
        &self,
        table: &T,
        hits: &[Hit],
    ) -> Result<EventReport, LineExtractError> {
        let extraction = extract_lines(hits, table, &self.params)?;
        let mut overflows = extraction.overflows;

        let fat = build_fat_lines(&extraction.lines, &self.params);
        overflows.extend(fat.overflows);

        let mut fat_lines = fat.fat_lines;
        let clustering = build_clusters(&mut fat_lines, &self.params);
        overflows.extend(clustering.overflow);

        debug!(
            "{} hits -> {} lines, {} fat lines, {} clusters",
            hits.len(),
            extraction.lines.len(),
            fat_lines.len(),
            clustering.clusters.len()
        );

        Ok(EventReport {
            lines: extraction.lines,
            fat_lines,
            clusters: clustering.clusters,
            dummy_hits: extraction.dummy_hits,
            repeated_hits: extraction.repeated_hits,
            overflows,
        })
    }
}
