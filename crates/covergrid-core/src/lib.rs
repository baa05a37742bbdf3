//! # covergrid-core
//!
//! This crate is the **primary library interface** for `covergrid`.
//! It validates input, normalizes markers, applies the O(1) short circuits and
//! then runs the closed-form composition, falling back to exact enumeration
//! when the composition is unsound for the marker layout.
//!
//! If you are embedding `covergrid` into another Rust application, depend on
//! this crate. Avoid depending on `covergrid-analytic` or
//! `covergrid-enumerate` directly unless necessary.
//!
//! ## Example
//!
//! ```
//! use covergrid_core::{count_covered_cells, Point};
//!
//! let cells = count_covered_cells(5, 5, 2, &[Point::new(2, 2)]).unwrap();
//! assert_eq!(cells, 13);
//!
//! // Thresholds far beyond the grid resolve without enumerating.
//! let cells = count_covered_cells(10, 10, 5_000_000, &[Point::new(5, 5)]).unwrap();
//! assert_eq!(cells, 100);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod ffi;

use serde::{Deserialize, Serialize};

// Re-export types for convenience
pub use covergrid_settings as settings;
pub use covergrid_types as types;

pub use covergrid_settings::{CountSettings, Strategy};
pub use covergrid_types::{
    CountPath, CoverageError, CoverageReport, CoverageRequest, Infeasible, Point,
};

use covergrid_analytic::analytic_count;
use covergrid_enumerate::enumerate_covered;
use covergrid_normalize::{MarkerSet, guarantees_full_coverage, normalize_markers};
use covergrid_types::{Grid, validate_threshold};

/// Count grid cells within Manhattan distance `threshold` of any marker.
///
/// Duplicate and out-of-grid markers are ignored. Uses default settings, so
/// configurations that would need more than
/// [`settings::DEFAULT_ENUMERATION_LIMIT`] enumerated cells are refused.
///
/// # Errors
///
/// * [`CoverageError::InvalidDimensions`] for a non-positive width or height
/// * [`CoverageError::NegativeThreshold`] for `threshold < 0`
/// * [`CoverageError::GridTooLarge`] when `width * height` exceeds `u64`
/// * [`CoverageError::EnumerationBudgetExceeded`] when the exact fallback
///   would be too expensive
pub fn count_covered_cells(
    width: i64,
    height: i64,
    threshold: i64,
    markers: &[Point],
) -> Result<u64, CoverageError> {
    count_points(width, height, threshold, markers, &CountSettings::default())
        .map(|report| report.cells)
}

/// Count cells for `request` and report which path produced the result.
pub fn count_with_settings(
    request: &CoverageRequest,
    settings: &CountSettings,
) -> Result<CoverageReport, CoverageError> {
    count_points(
        request.width,
        request.height,
        request.threshold,
        &request.markers,
        settings,
    )
}

/// Closed-form and enumerated counts for the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementReport {
    /// Closed-form count, when the composition is sound.
    pub analytic: Option<u64>,
    /// Why the closed form was skipped, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infeasible: Option<Infeasible>,
    /// Exact count from the enumerator.
    pub enumerated: u64,
    /// False only when both counts exist and differ.
    pub agrees: bool,
}

/// Run the closed-form path and the enumerator side by side.
///
/// No short circuit is applied, so both paths see the normalized markers
/// directly; the enumerator still honours the settings' visit limit.
pub fn check_agreement(
    request: &CoverageRequest,
    settings: &CountSettings,
) -> Result<AgreementReport, CoverageError> {
    let grid = Grid::new(request.width, request.height)?;
    validate_threshold(request.threshold)?;
    let n = request.threshold;
    let markers = normalize_markers(&grid, request.markers.iter().copied());

    let (analytic, infeasible) = match analytic_count(&grid, n, &markers) {
        Ok(count) => (Some(clamp_to_grid(count.cells(), &grid)), None),
        Err(reason) => (None, Some(reason)),
    };
    let enumerated = enumerate_covered(&grid, n, &markers, settings.limit())?;
    let agrees = analytic.is_none_or(|cells| cells == enumerated);

    if !agrees {
        log::warn!(
            "closed form and enumeration disagree for {}x{} n={n}: {analytic:?} vs {enumerated}",
            grid.width(),
            grid.height()
        );
    }

    Ok(AgreementReport {
        analytic,
        infeasible,
        enumerated,
        agrees,
    })
}

fn count_points(
    width: i64,
    height: i64,
    n: i64,
    raw: &[Point],
    settings: &CountSettings,
) -> Result<CoverageReport, CoverageError> {
    let grid = Grid::new(width, height)?;
    validate_threshold(n)?;
    let markers = normalize_markers(&grid, raw.iter().copied());

    if markers.is_empty() {
        return Ok(report(&markers, 0, CountPath::NoMarkers, None));
    }
    if guarantees_full_coverage(&grid, n) {
        log::debug!("n={n} covers the whole {width}x{height} grid");
        return Ok(report(
            &markers,
            grid.cell_count(),
            CountPath::FullCoverage,
            None,
        ));
    }
    if n == 0 {
        return Ok(report(
            &markers,
            markers.len() as u64,
            CountPath::ZeroThreshold,
            None,
        ));
    }

    match settings.strategy {
        Strategy::Enumerate => {
            let cells = enumerate_covered(&grid, n, &markers, settings.limit())?;
            Ok(report(&markers, cells, CountPath::Enumerated, None))
        }
        Strategy::Hybrid => match analytic_count(&grid, n, &markers) {
            Ok(count) => Ok(report(
                &markers,
                clamp_to_grid(count.cells(), &grid),
                CountPath::Analytic,
                None,
            )),
            Err(reason) => {
                log::debug!("falling back to enumeration: {reason}");
                let cells = enumerate_covered(&grid, n, &markers, settings.limit())?;
                Ok(report(&markers, cells, CountPath::Fallback, Some(reason)))
            }
        },
    }
}

fn report(
    markers: &MarkerSet,
    cells: u64,
    path: CountPath,
    fallback: Option<Infeasible>,
) -> CoverageReport {
    CoverageReport {
        cells,
        path,
        markers: markers.len(),
        discarded: markers.discarded(),
        fallback,
    }
}

/// A sound closed-form count always lies in `[0, width * height]`.
fn clamp_to_grid(cells: i128, grid: &Grid) -> u64 {
    let max = i128::from(grid.cell_count());
    debug_assert!((0..=max).contains(&cells), "closed form out of range: {cells}");
    cells.clamp(0, max) as u64
}
