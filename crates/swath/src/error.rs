//! Error type for mission planning.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Only conditions that abort a whole request live here. Geometric
//! degeneracies (parallel edges, a scanline with one crossing, an empty
//! survey area) are not errors: the kernel just returns less.

use thiserror::Error;

/// A request that cannot be planned at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Takeoff coordinate missing or not a finite `[lon, lat]` pair.
    #[error("invalid start point: {0}")]
    InvalidStartPoint(String),

    /// Spacing must be a positive, finite number of meters.
    #[error("spacing must be a positive number of meters, got {0}")]
    InvalidSpacing(f64),

    /// Every strip segment was rejected during validation.
    #[error("strip mission has no valid segments ({rejected} rejected)")]
    NoValidSegments { rejected: usize },
}
