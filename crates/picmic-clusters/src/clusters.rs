//! Fat-line intersections → cluster polygons.
//!
//! A cluster is the bounding polygon of a fat-line intersection, so very
//! little arithmetic happens here: it is mostly comparisons handling the
//! different ways the bands can overlap. Coordinates are `(b, y)` in
//! normalized strip indices; an R line `r` is the diagonal `y - b = r`.
//!
//! Two stages run in order:
//! 1. every Y/B/R triple whose three bands overlap gives a cluster of up to
//!    six edges;
//! 2. pairs of fat lines that are still free after stage 1 and have
//!    compatible widths give a four-edge cluster.

use crate::{ClusterParams, Overflow};
use log::error;
use picmic_core::{Cluster, Edge, EventClusters, EventFatLines, FatLine, Orientation, OrientationSet};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Clusters of one event, with the overflow that cut the search short if any.
#[derive(Clone, Debug, Serialize)]
pub struct ClusterExtraction {
    pub clusters: EventClusters,
    pub overflow: Option<Overflow>,
}

/// Find the clusters of an event.
///
/// Updates the `free` flag of every fat line that takes part in a triple
/// intersection. When `params.max_clusters` is reached the search stops
/// altogether, the two-orientation stage included.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(fat_lines = fat_lines.len()))
)]
pub fn build_clusters(fat_lines: &mut EventFatLines, params: &ClusterParams) -> ClusterExtraction {
    let mut clusters = EventClusters::new(params.max_clusters);
    let overflow = triple_stage(&mut clusters, fat_lines, params)
        .and_then(|()| pair_stage(&mut clusters, fat_lines, params))
        .err();
    if let Some(overflow) = &overflow {
        error!("{overflow}");
    }
    ClusterExtraction { clusters, overflow }
}

fn emit(clusters: &mut EventClusters, cluster: Cluster) -> Result<(), Overflow> {
    clusters
        .clusters
        .push(cluster)
        .map_err(|e| Overflow::Clusters {
            capacity: e.capacity,
        })
}

/// Keep an edge unless its endpoints are inverted.
fn push_edge(cluster: &mut Cluster, edge: Edge) {
    if edge.start.x <= edge.end.x && edge.start.y <= edge.end.y {
        cluster.edges.push(edge);
    }
}

fn triple_stage(
    clusters: &mut EventClusters,
    fat_lines: &mut EventFatLines,
    params: &ClusterParams,
) -> Result<(), Overflow> {
    let EventFatLines { yfat, bfat, rfat } = fat_lines;
    for yi in 0..yfat.len() {
        for bi in 0..bfat.len() {
            for ri in 0..rfat.len() {
                let (y, b, r) = (yfat[yi], bfat[bi], rfat[ri]);
                if !triple_intersects(&y, &b, &r) {
                    continue;
                }
                emit(clusters, triple_cluster(&y, &b, &r))?;
                retire(
                    [
                        &mut yfat.as_mut_slice()[yi],
                        &mut bfat.as_mut_slice()[bi],
                        &mut rfat.as_mut_slice()[ri],
                    ],
                    params,
                );
            }
        }
    }
    Ok(())
}

/// Whether the R band crosses the Y×B rectangle.
///
/// Along the rectangle, `y - b` spans `[y0 - b1, y1 - b0]`; the bands meet
/// when that range overlaps `[r0, r1]`.
pub fn triple_intersects(y: &FatLine, b: &FatLine, r: &FatLine) -> bool {
    let (lo, hi) = (y.vmin - b.vmax, y.vmax - b.vmin);
    (r.vmin <= lo && lo <= r.vmax)
        || (r.vmin <= hi && hi <= r.vmax)
        || (lo <= r.vmin && r.vmin <= hi)
        || (lo <= r.vmax && r.vmax <= hi)
}

fn triple_cluster(y: &FatLine, b: &FatLine, r: &FatLine) -> Cluster {
    let (y0, y1, b0, b1, r0, r1) = (y.vmin, y.vmax, b.vmin, b.vmax, r.vmin, r.vmax);
    let mut cluster = Cluster::new(OrientationSet::ALL);

    for yv in [y0, y1] {
        push_edge(
            &mut cluster,
            Edge::new(b0.max(yv - r1), yv, b1.min(yv - r0), yv),
        );
    }
    for bv in [b0, b1] {
        push_edge(
            &mut cluster,
            Edge::new(bv, y0.max(r0 + bv), bv, y1.min(r1 + bv)),
        );
    }
    for rv in [r0, r1] {
        let (x0, ys) = if y0 >= b0 + rv {
            (y0 - rv, y0)
        } else {
            (b0, rv + b0)
        };
        let (x1, ye) = if y1 <= b1 + rv {
            (y1 - rv, y1)
        } else {
            (b1, rv + b1)
        };
        push_edge(&mut cluster, Edge::new(x0, ys, x1, ye));
    }
    cluster
}

/// Decide whether fat lines of a triple stay available for stage 2.
///
/// Only a fat line much wider than the narrowest one of the triple and
/// sparse enough stays free.
fn retire(fats: [&mut FatLine; 3], params: &ClusterParams) {
    let minw = fats.iter().map(|f| f.width).min().unwrap_or(0);
    let limit = i64::from(minw) * i64::from(params.reuse_width_factor);
    for fat in fats {
        fat.free = i64::from(fat.width) > limit && fat.density < params.reuse_max_density;
    }
}

/// Two-orientation eligibility: both free, widths within a factor
/// `fatline_cut` of each other, and wide enough together.
pub fn fat_intersect(a: &FatLine, b: &FatLine, params: &ClusterParams) -> bool {
    let (narrow, wide) = (i64::from(a.width.min(b.width)), i64::from(a.width.max(b.width)));
    a.free
        && b.free
        && narrow * i64::from(params.fatline_cut) >= wide
        && narrow + wide > i64::from(params.fatintersect_cut)
}

fn pair_stage(
    clusters: &mut EventClusters,
    fat_lines: &EventFatLines,
    params: &ClusterParams,
) -> Result<(), Overflow> {
    use Orientation::{B, R, Y};

    for y in fat_lines.yfat.iter() {
        for b in fat_lines.bfat.iter() {
            if fat_intersect(y, b, params) {
                emit(clusters, pair_cluster([Y, B], yb_edges(y, b)))?;
            }
        }
        for r in fat_lines.rfat.iter() {
            if fat_intersect(y, r, params) {
                emit(clusters, pair_cluster([Y, R], yr_edges(y, r)))?;
            }
        }
    }
    for b in fat_lines.bfat.iter() {
        for r in fat_lines.rfat.iter() {
            if fat_intersect(b, r, params) {
                emit(clusters, pair_cluster([B, R], br_edges(b, r)))?;
            }
        }
    }
    Ok(())
}

fn pair_cluster(orientations: [Orientation; 2], edges: [Edge; 4]) -> Cluster {
    let mut cluster = Cluster::new(OrientationSet::of(&orientations));
    for edge in edges {
        push_edge(&mut cluster, edge);
    }
    cluster
}

fn yb_edges(y: &FatLine, b: &FatLine) -> [Edge; 4] {
    let (y0, y1, b0, b1) = (y.vmin, y.vmax, b.vmin, b.vmax);
    [
        Edge::new(b0, y0, b1, y0),
        Edge::new(b0, y1, b1, y1),
        Edge::new(b0, y0, b0, y1),
        Edge::new(b1, y0, b1, y1),
    ]
}

fn yr_edges(y: &FatLine, r: &FatLine) -> [Edge; 4] {
    let (y0, y1, r0, r1) = (y.vmin, y.vmax, r.vmin, r.vmax);
    [
        Edge::new(y0 - r1, y0, y0 - r0, y0),
        Edge::new(y1 - r1, y1, y1 - r0, y1),
        Edge::new(y0 - r0, y0, y1 - r0, y1),
        Edge::new(y0 - r1, y0, y1 - r1, y1),
    ]
}

fn br_edges(b: &FatLine, r: &FatLine) -> [Edge; 4] {
    let (b0, b1, r0, r1) = (b.vmin, b.vmax, r.vmin, r.vmax);
    [
        Edge::new(b0, r0 + b0, b0, r1 + b0),
        Edge::new(b1, r0 + b1, b1, r1 + b1),
        Edge::new(b0, r0 + b0, b1, r0 + b1),
        Edge::new(b0, r1 + b0, b1, r1 + b1),
    ]
}
