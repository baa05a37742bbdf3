//! BDD-style scenario tests for covergrid-core.
//!
//! Each test follows Given / When / Then structure and records which branch
//! of the pipeline produced the count.

use covergrid_core::*;

fn pts(raw: &[(i64, i64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

fn run(w: i64, h: i64, n: i64, raw: &[(i64, i64)]) -> CoverageReport {
    count_with_settings(
        &CoverageRequest::new(w, h, n, pts(raw)),
        &CountSettings::default(),
    )
    .expect("valid request")
}

mod single_marker {
    use super::*;

    #[test]
    fn centered_diamond_fits_entirely() {
        // Given: a 5x5 grid with one marker in the middle
        // When: we count with threshold 2
        let report = run(5, 5, 2, &[(2, 2)]);
        // Then: the full 13-cell diamond is counted in closed form
        assert_eq!(report.cells, 13);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn diamond_clipped_on_the_left() {
        // Given: a marker one column from the left edge
        let report = run(11, 11, 3, &[(5, 1)]);
        // Then: the clipped diamond has 21 cells
        assert_eq!(report.cells, 21);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn diamond_clipped_on_three_sides() {
        // Given: a 3-row grid and a marker in the top row
        // When / Then: clipping on top, bottom and left leaves 10 cells
        assert_eq!(run(3, 11, 3, &[(0, 1)]).cells, 10);
    }

    #[test]
    fn one_column_grid() {
        // Given: a single-column grid
        // When / Then: only the column below the marker is reachable
        assert_eq!(run(1, 11, 3, &[(0, 0)]).cells, 4);
    }

    #[test]
    fn two_row_grid() {
        // Given: an 11-wide, 2-tall grid with a corner marker
        assert_eq!(run(11, 2, 3, &[(0, 0)]).cells, 7);
    }

    #[test]
    fn marker_in_last_column_of_short_grid() {
        // Given: a 4x2 grid with the marker in the far corner
        assert_eq!(run(4, 2, 3, &[(0, 3)]).cells, 7);
    }
}

mod two_markers {
    use super::*;

    #[test]
    fn overlapping_interior_diamonds() {
        // Given: two vertically adjacent interior markers
        let report = run(11, 11, 2, &[(7, 5), (6, 5)]);
        // Then: the overlap is subtracted once
        assert_eq!(report.cells, 18);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn disjoint_corner_diamonds() {
        // Given: markers in opposite corners
        let report = run(10, 10, 3, &[(0, 0), (9, 9)]);
        // Then: each clipped quarter diamond contributes 10 cells
        assert_eq!(report.cells, 20);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn overlapping_pair_with_one_clipped_falls_back() {
        // Given: two overlapping markers, one clipped by the top edge
        let report = run(11, 11, 4, &[(3, 5), (5, 6)]);
        // Then: the exact enumerator produces the count
        assert_eq!(report.cells, 57);
        assert_eq!(report.path, CountPath::Fallback);
        assert!(matches!(
            report.fallback,
            Some(Infeasible::ClippedOverlap { .. })
        ));
    }

    #[test]
    fn overlapping_pair_in_same_column_falls_back() {
        assert_eq!(run(11, 11, 4, &[(3, 6), (5, 6)]).cells, 56);
    }

    #[test]
    fn overlapping_unclipped_pair_stays_closed_form() {
        let report = run(11, 11, 4, &[(4, 6), (5, 6)]);
        assert_eq!(report.cells, 50);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn diagonal_neighbours() {
        assert_eq!(run(11, 11, 2, &[(7, 3), (6, 5)]).cells, 22);
    }

    #[test]
    fn corner_pair_overlapping_and_clipped() {
        let report = run(10, 10, 2, &[(1, 1), (0, 0)]);
        assert_eq!(report.cells, 11);
        assert_eq!(report.path, CountPath::Fallback);
    }

    #[test]
    fn far_apart_markers_on_a_huge_grid() {
        // Given: a 10^7 x 10^7 grid with two small diamonds far apart
        let report = run(10_000_000, 10_000_000, 3, &[(50_000, 50_000), (1, 1)]);
        // Then: 25 + 17 cells, computed without touching the grid
        assert_eq!(report.cells, 42);
        assert_eq!(report.path, CountPath::Analytic);
    }
}

mod three_markers {
    use super::*;

    #[test]
    fn chain_of_overlaps_falls_back() {
        // Given: three adjacent markers in a row
        let report = run(20, 20, 4, &[(5, 6), (5, 7), (5, 8)]);
        // Then: a three-way overlap forces enumeration
        assert_eq!(report.cells, 59);
        assert_eq!(report.path, CountPath::Fallback);
        assert!(matches!(
            report.fallback,
            Some(Infeasible::MultiOverlap { .. })
        ));
    }
}

mod short_circuits {
    use super::*;

    #[test]
    fn threshold_spanning_the_grid() {
        // Given: threshold large enough to reach every cell from anywhere
        let report = run(2, 8, 8, &[(0, 0)]);
        // Then: every cell is covered
        assert_eq!(report.cells, 16);
        assert_eq!(report.path, CountPath::FullCoverage);
    }

    #[test]
    fn enormous_threshold_never_enumerates() {
        // Given: a budget of zero cells and a five-million threshold
        let settings = CountSettings {
            enumeration_limit: 0,
            ..Default::default()
        };
        let request = CoverageRequest::new(10, 10, 5_000_000, pts(&[(5, 5), (4, 4)]));
        // When: we count
        let report = count_with_settings(&request, &settings).unwrap();
        // Then: full coverage answers before the budget matters
        assert_eq!(report.cells, 100);
        assert_eq!(report.path, CountPath::FullCoverage);
    }

    #[test]
    fn single_giant_diamond() {
        // Given: a 10^8 grid with one central marker and n = 5*10^6
        let report = run(100_000_000, 100_000_000, 5_000_000, &[(50_000_000, 50_000_000)]);
        // Then: the ideal diamond size is returned
        assert_eq!(report.cells, 50_000_010_000_001);
        assert_eq!(report.path, CountPath::Analytic);
    }

    #[test]
    fn zero_threshold_counts_markers() {
        let report = run(10, 10, 0, &[(5, 5), (1, 1), (1, 0)]);
        assert_eq!(report.cells, 3);
        assert_eq!(report.path, CountPath::ZeroThreshold);
    }

    #[test]
    fn out_of_range_markers_are_dropped() {
        // Given: one marker off the grid and one inside
        let report = run(10, 10, 3, &[(15, 15), (1, 1)]);
        // Then: only the in-grid marker counts
        assert_eq!(report.cells, 17);
        assert_eq!(report.markers, 1);
        assert_eq!(report.discarded, 1);
    }

    #[test]
    fn no_surviving_markers() {
        let report = run(10, 10, 3, &[(-1, 0), (10, 10)]);
        assert_eq!(report.cells, 0);
        assert_eq!(report.path, CountPath::NoMarkers);
    }
}

mod misuse {
    use super::*;

    #[test]
    fn non_positive_width_is_rejected() {
        assert!(matches!(
            count_covered_cells(0, 10, 1, &[]),
            Err(CoverageError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert_eq!(
            count_covered_cells(10, 10, -3, &[Point::new(1, 1)]),
            Err(CoverageError::NegativeThreshold(-3))
        );
    }

    #[test]
    fn expensive_fallback_is_refused() {
        // Given: a clipped overlapping pair with a large threshold on a huge grid
        let request = CoverageRequest::new(
            1_000_000,
            1_000_000,
            100_000,
            pts(&[(0, 0), (1, 1)]),
        );
        // When: we count with a small limit
        let settings = CountSettings {
            enumeration_limit: 1_000,
            ..Default::default()
        };
        // Then: the enumerator refuses instead of running for minutes
        assert!(matches!(
            count_with_settings(&request, &settings),
            Err(CoverageError::EnumerationBudgetExceeded { limit: 1_000, .. })
        ));
    }
}
