//! # covergrid-normalize
//!
//! **Tier 1 (Input Shaping)**
//!
//! Marker normalization and the full-coverage short circuit.
//!
//! ## What belongs here
//! * Deduplication and bounds filtering of raw markers
//! * O(1) checks that decide a result before any counting runs
//!
//! ## What does NOT belong here
//! * Counting logic
//! * Argument validation (see `covergrid-types`)

#![forbid(unsafe_code)]

use std::collections::HashSet;

use covergrid_types::{Grid, Point};

/// Duplicate-free, in-bounds markers in first-seen order.
///
/// Built once per call by [`normalize_markers`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    points: Vec<Point>,
    discarded: usize,
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Raw markers dropped as duplicates or out of bounds.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Keep each marker with `0 <= row < height` and `0 <= col < width` once.
pub fn normalize_markers<I>(grid: &Grid, raw: I) -> MarkerSet
where
    I: IntoIterator<Item = Point>,
{
    let mut seen = HashSet::new();
    let mut points = Vec::new();
    let mut discarded = 0usize;

    for point in raw {
        if grid.contains(point) && seen.insert(point) {
            points.push(point);
        } else {
            discarded += 1;
        }
    }

    if discarded > 0 {
        log::debug!(
            "normalized markers: kept {}, discarded {}",
            points.len(),
            discarded
        );
    }

    MarkerSet { points, discarded }
}

/// Whether a threshold of `n` covers every cell from any marker position.
///
/// The worst case is a marker in a corner, whose farthest cell is the
/// opposite corner at distance `width + height - 2`:
///
/// ```text
/// n = 3, width + height = 5
/// [x 1 1]1
/// [1 1 1]
///  1 1
///  1
/// ```
pub fn guarantees_full_coverage(grid: &Grid, n: i64) -> bool {
    i128::from(n) + 2 >= i128::from(grid.width()) + i128::from(grid.height())
}
