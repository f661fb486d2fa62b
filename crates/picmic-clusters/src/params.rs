//! Tunable cuts and capacities of the reconstruction stages.
//!
//! Every field has a default, so a config only names what it changes:
//!
//! ```
//! use picmic_clusters::ClusterParams;
//!
//! let params: ClusterParams = serde_json::from_str(r#"{"max_clusters": 8}"#).unwrap();
//! assert_eq!(params.max_clusters, 8);
//! assert_eq!(params.fatline_cut, ClusterParams::default().fatline_cut);
//! assert!(params.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

/// What to do with a hit identical to the one just before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateHits {
    /// Every hit produces a line, repeated or not.
    #[default]
    Keep,
    /// Drop a hit equal to the immediately preceding one (readout repeat).
    SkipRepeated,
}

/// Parameters of the three reconstruction stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Two consecutive lines closer than this belong to the same fat line.
    ///
    /// Also bounds the width ratio of two fat lines in a two-orientation
    /// intersection.
    pub fatline_cut: i32,
    /// Two fat lines only form a two-orientation cluster when their widths
    /// add up to more than this.
    pub fatintersect_cut: i32,
    /// After a triple intersection a fat line stays free only if it is wider
    /// than `reuse_width_factor` times the narrowest of the three and
    /// sparser than `reuse_max_density`.
    pub reuse_width_factor: i32,
    pub reuse_max_density: f64,
    /// Hits considered per event.
    pub max_hits: usize,
    /// Lines kept per orientation.
    pub max_lines: usize,
    /// Fat lines kept per orientation.
    pub max_fat_lines: usize,
    /// Clusters kept per event.
    pub max_clusters: usize,
    pub duplicate_hits: DuplicateHits,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            fatline_cut: 40,
            fatintersect_cut: 45,
            reuse_width_factor: 10,
            reuse_max_density: 0.4,
            max_hits: 256,
            max_lines: 256,
            max_fat_lines: 10,
            max_clusters: 20,
            duplicate_hits: DuplicateHits::Keep,
        }
    }
}

/// Parameter validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("fatline_cut must be >= 1 (got {0})")]
    InvalidFatlineCut(i32),
    #[error("fatintersect_cut must be >= 0 (got {0})")]
    InvalidFatintersectCut(i32),
    #[error("reuse_width_factor must be >= 1 (got {0})")]
    InvalidReuseWidthFactor(i32),
    #[error("reuse_max_density must be finite (got {0})")]
    InvalidReuseDensity(f64),
}

impl ClusterParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.fatline_cut < 1 {
            return Err(ParamsError::InvalidFatlineCut(self.fatline_cut));
        }
        if self.fatintersect_cut < 0 {
            return Err(ParamsError::InvalidFatintersectCut(self.fatintersect_cut));
        }
        if self.reuse_width_factor < 1 {
            return Err(ParamsError::InvalidReuseWidthFactor(
                self.reuse_width_factor,
            ));
        }
        if !self.reuse_max_density.is_finite() {
            return Err(ParamsError::InvalidReuseDensity(self.reuse_max_density));
        }
        Ok(())
    }
}
