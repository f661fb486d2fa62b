//! Per-event data: extracted lines, fat lines and clusters.
//!
//! All containers are bounded; the builders in `picmic-clusters` decide what
//! to do when a push is refused.

use crate::{BoundedVec, Orientation, OrientationSet};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of edges of a cluster polygon.
pub const MAX_CLUSTER_EDGES: usize = 6;

/// Normalized strip indices fired in one event, one sorted sequence per orientation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventLines {
    pub ylines: BoundedVec<i32>,
    pub blines: BoundedVec<i32>,
    pub rlines: BoundedVec<i32>,
}

impl EventLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            ylines: BoundedVec::new(capacity),
            blines: BoundedVec::new(capacity),
            rlines: BoundedVec::new(capacity),
        }
    }

    pub fn get(&self, o: Orientation) -> &BoundedVec<i32> {
        match o {
            Orientation::Y => &self.ylines,
            Orientation::B => &self.blines,
            Orientation::R => &self.rlines,
        }
    }

    pub fn get_mut(&mut self, o: Orientation) -> &mut BoundedVec<i32> {
        match o {
            Orientation::Y => &mut self.ylines,
            Orientation::B => &mut self.blines,
            Orientation::R => &mut self.rlines,
        }
    }

    /// Total number of lines over the three orientations.
    pub fn len(&self) -> usize {
        self.ylines.len() + self.blines.len() + self.rlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sort(&mut self) {
        for o in Orientation::ALL {
            self.get_mut(o).sort();
        }
    }
}

impl fmt::Display for EventLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventLines(")?;
        for o in Orientation::ALL {
            write!(f, "\n  {}lines=[", o.letter().to_ascii_lowercase())?;
            for (k, v) in self.get(o).iter().enumerate() {
                if k != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        write!(f, ")")
    }
}

/// Interval of nearby same-orientation lines treated as one coarse band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FatLine {
    pub vmin: i32,
    pub vmax: i32,
    pub width: i32,
    /// Merged raw lines per unit of width.
    pub density: f64,
    /// Still eligible for a two-orientation intersection.
    pub free: bool,
}

impl FatLine {
    /// Fat line spanning `[first, last]` built from `nline` raw lines.
    pub fn new(first: i32, last: i32, nline: usize) -> Self {
        let width = last - first + 1;
        Self {
            vmin: first,
            vmax: last,
            width,
            density: nline as f64 / width as f64,
            free: true,
        }
    }
}

impl fmt::Display for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(vmin={}, vmax={}, density={:.2}, free={})",
            self.vmin, self.vmax, self.density, self.free
        )
    }
}

/// Fat lines of one event, one bounded sequence per orientation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventFatLines {
    pub yfat: BoundedVec<FatLine>,
    pub bfat: BoundedVec<FatLine>,
    pub rfat: BoundedVec<FatLine>,
}

impl EventFatLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            yfat: BoundedVec::new(capacity),
            bfat: BoundedVec::new(capacity),
            rfat: BoundedVec::new(capacity),
        }
    }

    pub fn get(&self, o: Orientation) -> &BoundedVec<FatLine> {
        match o {
            Orientation::Y => &self.yfat,
            Orientation::B => &self.bfat,
            Orientation::R => &self.rfat,
        }
    }

    pub fn get_mut(&mut self, o: Orientation) -> &mut BoundedVec<FatLine> {
        match o {
            Orientation::Y => &mut self.yfat,
            Orientation::B => &mut self.bfat,
            Orientation::R => &mut self.rfat,
        }
    }

    pub fn len(&self) -> usize {
        self.yfat.len() + self.bfat.len() + self.rfat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark every fat line free again, as freshly built.
    pub fn reset_free(&mut self) {
        for o in Orientation::ALL {
            for fat in self.get_mut(o).as_mut_slice() {
                fat.free = true;
            }
        }
    }
}

impl fmt::Display for EventFatLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventFatLines(")?;
        for o in Orientation::ALL {
            write!(f, "\n  fat_{}lines=[", o.letter().to_ascii_lowercase())?;
            for (k, fat) in self.get(o).iter().enumerate() {
                if k != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{fat}")?;
            }
            write!(f, "]")?;
        }
        write!(f, ")")
    }
}

/// Polygon edge in orientation-index coordinates (x = B index, y = Y index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Point2<i32>,
    pub end: Point2<i32>,
}

impl Edge {
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            start: Point2::new(x0, y0),
            end: Point2::new(x1, y1),
        }
    }

    /// `[x0, y0, x1, y1]`.
    pub fn coords(&self) -> [i32; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(({}, {}), ({}, {}))",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

/// Bounding polygon of a fat-line intersection.
///
/// Edges are kept in emission order, not walked around the polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub edges: Vec<Edge>,
    pub kind: OrientationSet,
}

impl Cluster {
    pub fn new(kind: OrientationSet) -> Self {
        Self {
            edges: Vec::with_capacity(MAX_CLUSTER_EDGES),
            kind,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "([")?;
        for (k, e) in self.edges.iter().enumerate() {
            if k != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "], type={})", self.kind.bits())
    }
}

/// Clusters found in one event.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventClusters {
    pub clusters: BoundedVec<Cluster>,
}

impl EventClusters {
    pub fn new(capacity: usize) -> Self {
        Self {
            clusters: BoundedVec::new(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }
}

impl fmt::Display for EventClusters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EventClusters([")?;
        for (k, c) in self.clusters.iter().enumerate() {
            if k != 0 {
                writeln!(f, ",")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "])")
    }
}
