//! # covergrid-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures and error contracts shared by the
//! `covergrid` crates. It contains only data types and Serde definitions.
//!
//! ## What belongs here
//! * Grid coordinates, dimensions and diamonds (Manhattan balls)
//! * Request/report structs for the public entry points
//! * The `CoverageError` taxonomy
//!
//! ## What does NOT belong here
//! * Counting logic (see `covergrid-analytic` and `covergrid-enumerate`)
//! * File I/O
//! * CLI argument parsing

#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

/// A grid cell addressed by `(row, col)`.
///
/// Coordinates are signed so callers can pass raw, unvalidated markers;
/// anything outside the grid is filtered during normalization.
/// Serialized as a two-element `[row, col]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Point {
    pub row: i64,
    pub col: i64,
}

impl Point {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance, widened so extreme coordinates cannot overflow.
    #[must_use]
    pub fn manhattan_distance(self, other: Point) -> i128 {
        (i128::from(self.row) - i128::from(other.row)).abs()
            + (i128::from(self.col) - i128::from(other.col)).abs()
    }
}

impl From<(i64, i64)> for Point {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.row, p.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Validated grid dimensions.
///
/// Both sides are at least one and `width * height` fits in a `u64`, so every
/// count this crate family produces is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: i64,
    height: i64,
}

impl Grid {
    /// Validate and build a grid of `width` columns by `height` rows.
    pub fn new(width: i64, height: i64) -> Result<Self, CoverageError> {
        if width < 1 || height < 1 {
            return Err(CoverageError::InvalidDimensions { width, height });
        }
        let cells = i128::from(width) * i128::from(height);
        if cells > i128::from(u64::MAX) {
            return Err(CoverageError::GridTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub const fn width(&self) -> i64 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> i64 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> u64 {
        // Fits by construction.
        (self.width as u64) * (self.height as u64)
    }

    /// Whether `point` lies in `[0, height) x [0, width)`.
    pub fn contains(&self, point: Point) -> bool {
        point.row >= 0 && point.row < self.height && point.col >= 0 && point.col < self.width
    }
}

/// Reject a negative distance threshold.
pub fn validate_threshold(threshold: i64) -> Result<(), CoverageError> {
    if threshold < 0 {
        Err(CoverageError::NegativeThreshold(threshold))
    } else {
        Ok(())
    }
}

/// A Manhattan ball, kept as `(center, radius)` and never materialized.
///
/// Extremal points saturate at the `i64` range; such points are never inside
/// a valid grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diamond {
    pub center: Point,
    pub radius: i64,
}

impl Diamond {
    pub const fn new(center: Point, radius: i64) -> Self {
        Self { center, radius }
    }

    pub fn north(&self) -> Point {
        Point::new(self.center.row.saturating_sub(self.radius), self.center.col)
    }

    pub fn east(&self) -> Point {
        Point::new(self.center.row, self.center.col.saturating_add(self.radius))
    }

    pub fn south(&self) -> Point {
        Point::new(self.center.row.saturating_add(self.radius), self.center.col)
    }

    pub fn west(&self) -> Point {
        Point::new(self.center.row, self.center.col.saturating_sub(self.radius))
    }

    /// Whether `point` is within `radius` of the center.
    pub fn contains(&self, point: Point) -> bool {
        self.center.manhattan_distance(point) <= i128::from(self.radius)
    }

    /// Whether two diamonds share at least one cell.
    ///
    /// For two balls of radii `r1` and `r2` this is `distance <= r1 + r2`.
    pub fn intersects(&self, other: &Diamond) -> bool {
        self.center.manhattan_distance(other.center)
            <= i128::from(self.radius) + i128::from(other.radius)
    }
}

/// Input to a counting call: grid size, threshold and raw markers.
///
/// Markers may contain duplicates or out-of-range entries; both are
/// normalized away rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRequest {
    pub width: i64,
    pub height: i64,
    pub threshold: i64,
    #[serde(default)]
    pub markers: Vec<Point>,
}

impl CoverageRequest {
    pub fn new(width: i64, height: i64, threshold: i64, markers: Vec<Point>) -> Self {
        Self {
            width,
            height,
            threshold,
            markers,
        }
    }
}

/// Which branch of the counting pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPath {
    /// No marker survived normalization.
    NoMarkers,
    /// The threshold covers the whole grid from any position.
    FullCoverage,
    /// `n == 0`: each distinct marker covers only itself.
    ZeroThreshold,
    /// Closed-form composition.
    Analytic,
    /// The analytic composition was infeasible; exact enumeration was used.
    Fallback,
    /// Exact enumeration was requested directly.
    Enumerated,
}

impl CountPath {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoMarkers => "no_markers",
            Self::FullCoverage => "full_coverage",
            Self::ZeroThreshold => "zero_threshold",
            Self::Analytic => "analytic",
            Self::Fallback => "fallback",
            Self::Enumerated => "enumerated",
        }
    }
}

impl fmt::Display for CountPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the analytic composition cannot be trusted for a marker set.
///
/// This is an internal control-flow signal: the orchestrator always recovers
/// from it by enumerating, and only records it in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Infeasible {
    #[error("diamonds at {first} and {second} overlap while at least one is clipped by the grid")]
    ClippedOverlap { first: Point, second: Point },

    #[error("diamonds at {first} and {second} overlap but one already overlaps another diamond")]
    MultiOverlap { first: Point, second: Point },
}

/// Outcome of a counting call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Distinct covered cells.
    pub cells: u64,
    /// Branch that produced `cells`.
    pub path: CountPath,
    /// Markers retained after normalization.
    pub markers: usize,
    /// Raw markers dropped as duplicates or out of bounds.
    pub discarded: usize,
    /// Set when `path` is `Fallback`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Infeasible>,
}

/// Errors surfaced to callers.
///
/// Analytic infeasibility is not listed; it never escapes the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Distance threshold must be non-negative, got {0}")]
    NegativeThreshold(i64),

    #[error("Grid {width}x{height} has more cells than fit in a 64-bit count")]
    GridTooLarge { width: i64, height: i64 },

    #[error("Enumeration would visit {projected} cells, above the limit of {limit}")]
    EnumerationBudgetExceeded { projected: u128, limit: u64 },
}
