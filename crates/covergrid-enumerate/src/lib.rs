//! # covergrid-enumerate
//!
//! **Tier 2 (Exact Counting)**
//!
//! Exact enumeration of covered cells, used when the closed-form composition
//! cannot be trusted. Correct for any marker configuration; costs time
//! proportional to the total diamond area, so it is guarded by a visit limit.
//!
//! ## What belongs here
//! * The layer walk around one diamond
//! * The per-call membership set and its cost guard
//!
//! ## What does NOT belong here
//! * Deciding when to enumerate (see `covergrid-core`)

#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::iter::FusedIterator;

use covergrid_math::ideal_diamond_size;
use covergrid_normalize::MarkerSet;
use covergrid_types::{CoverageError, Diamond, Grid, Point};

/// Upper bound on the membership set's initial allocation.
const MAX_PREALLOCATED_CELLS: u64 = 1 << 20;

/// Membership key for one in-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    row: i64,
    col: i64,
}

impl From<Point> for CellKey {
    fn from(p: Point) -> Self {
        Self {
            row: p.row,
            col: p.col,
        }
    }
}

/// The `4d` cells at exactly distance `d` from a center (just the center
/// for `d == 0`).
///
/// Step `i` of a layer yields one cell on each of the four strides, each an
/// offset of an extremal point:
///
/// ```text
///        N            N moves southeast
///      .   .          E moves southwest
///    W   X   E        S moves northwest
///      .   .          W moves northeast
///        S
/// ```
///
/// Every stride stops one cell short of the next extremal point, so the
/// layers `0..=n` visit each cell of the diamond exactly once.
#[derive(Debug, Clone)]
pub struct LayerWalk {
    diamond: Diamond,
    step: i64,
    stride: u8,
}

impl LayerWalk {
    pub fn new(center: Point, distance: i64) -> Self {
        Self {
            diamond: Diamond::new(center, distance),
            step: 0,
            stride: 0,
        }
    }

    fn remaining(&self) -> usize {
        let radius = self.diamond.radius;
        if radius == 0 {
            return usize::from(self.step == 0);
        }
        let left = (radius - self.step).max(0) as u128 * 4 - u128::from(self.stride);
        usize::try_from(left).unwrap_or(usize::MAX)
    }
}

impl Iterator for LayerWalk {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let radius = self.diamond.radius;
        if radius == 0 {
            if self.step == 0 {
                self.step = 1;
                return Some(self.diamond.center);
            }
            return None;
        }
        if self.step >= radius {
            return None;
        }

        let i = self.step;
        let point = match self.stride {
            0 => {
                let p = self.diamond.north();
                Point::new(p.row + i, p.col + i)
            }
            1 => {
                let p = self.diamond.east();
                Point::new(p.row + i, p.col - i)
            }
            2 => {
                let p = self.diamond.south();
                Point::new(p.row - i, p.col - i)
            }
            _ => {
                let p = self.diamond.west();
                Point::new(p.row - i, p.col + i)
            }
        };

        self.stride += 1;
        if self.stride == 4 {
            self.stride = 0;
            self.step += 1;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining();
        (left, Some(left))
    }
}

impl FusedIterator for LayerWalk {}

/// Cells the walk visits before deduplication: one full diamond per marker.
pub fn projected_visits(n: i64, markers: usize) -> u128 {
    // `ideal_diamond_size` is positive for n >= 0.
    ideal_diamond_size(i128::from(n)).unsigned_abs() * markers as u128
}

/// Count covered cells by walking every diamond into a membership set.
///
/// `limit` caps [`projected_visits`]; the call is refused before any work
/// when the projection exceeds it. `None` disables the guard.
pub fn enumerate_covered(
    grid: &Grid,
    n: i64,
    markers: &MarkerSet,
    limit: Option<u64>,
) -> Result<u64, CoverageError> {
    let projected = projected_visits(n, markers.len());
    if let Some(limit) = limit
        && projected > u128::from(limit)
    {
        log::warn!("refusing to enumerate {projected} cells (limit {limit})");
        return Err(CoverageError::EnumerationBudgetExceeded { projected, limit });
    }

    let capacity = projected
        .min(u128::from(grid.cell_count()))
        .min(u128::from(MAX_PREALLOCATED_CELLS)) as usize;
    let mut covered: HashSet<CellKey> = HashSet::with_capacity(capacity);

    for &center in markers {
        for distance in 0..=n {
            covered.extend(
                LayerWalk::new(center, distance)
                    .filter(|p| grid.contains(*p))
                    .map(CellKey::from),
            );
        }
        log::trace!("after {center}: {} cells covered", covered.len());
    }

    log::debug!(
        "enumerated {} markers at n={n}: {} cells",
        markers.len(),
        covered.len()
    );
    Ok(covered.len() as u64)
}
