//! Decides whether closed-form composition is exact for a marker set.

use covergrid_math::ideal_diamond_size;
use covergrid_normalize::MarkerSet;
use covergrid_types::{Grid, Infeasible, Point};

use crate::boundary::{boundary_loss, is_clipped};
use crate::overlap::{has_overlap, pairwise_overlap};

/// Terms of `ideal - boundary_loss - overlap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticCount {
    /// Sum of unclipped diamond sizes.
    pub ideal: i128,
    /// Cells outside the grid, summed over markers.
    pub boundary_loss: i128,
    /// Cells shared by overlapping pairs, summed over pairs.
    pub overlap: i128,
}

impl AnalyticCount {
    pub fn cells(&self) -> i128 {
        self.ideal - self.boundary_loss - self.overlap
    }
}

fn diagonal_sum(p: Point) -> i128 {
    i128::from(p.row) + i128::from(p.col)
}

/// Count covered cells in closed form, or report why that is unsound.
///
/// The composition is exact when every overlapping pair is unclipped and no
/// marker belongs to more than one overlapping pair: then no cell is shared by
/// three diamonds and no shared cell lies outside the grid. Anything else is
/// rejected with the first offending pair; the decision never backtracks.
pub fn analytic_count(
    grid: &Grid,
    n: i64,
    markers: &MarkerSet,
) -> Result<AnalyticCount, Infeasible> {
    let points = markers.points();
    let mut count = AnalyticCount {
        ideal: ideal_diamond_size(i128::from(n)) * points.len() as i128,
        ..AnalyticCount::default()
    };

    // Overlapping diamonds differ by at most 2n in `row + col`, so a scan in
    // that order can stop at the first marker beyond reach.
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&i| diagonal_sum(points[i]));
    let reach = 2 * i128::from(n);
    let mut overlapped = vec![false; points.len()];

    for (pos, &i) in order.iter().enumerate() {
        let a = points[i];
        count.boundary_loss += boundary_loss(grid, n, a);

        for &j in &order[pos + 1..] {
            let b = points[j];
            if diagonal_sum(b) - diagonal_sum(a) > reach {
                break;
            }
            if !has_overlap(a, b, n) {
                continue;
            }

            if is_clipped(grid, n, a) || is_clipped(grid, n, b) {
                let reason = Infeasible::ClippedOverlap {
                    first: a,
                    second: b,
                };
                log::debug!("analytic composition rejected: {reason}");
                return Err(reason);
            }
            if overlapped[i] || overlapped[j] {
                let reason = Infeasible::MultiOverlap {
                    first: a,
                    second: b,
                };
                log::debug!("analytic composition rejected: {reason}");
                return Err(reason);
            }

            overlapped[i] = true;
            overlapped[j] = true;
            count.overlap += pairwise_overlap(a, b, n);
        }
    }

    log::trace!(
        "analytic terms: ideal={} boundary_loss={} overlap={}",
        count.ideal,
        count.boundary_loss,
        count.overlap
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use covergrid_normalize::normalize_markers;

    fn run(w: i64, h: i64, n: i64, pts: &[(i64, i64)]) -> Result<AnalyticCount, Infeasible> {
        let grid = Grid::new(w, h).unwrap();
        let markers = normalize_markers(&grid, pts.iter().copied().map(Point::from));
        analytic_count(&grid, n, &markers)
    }

    #[test]
    fn separate_unclipped_diamonds_add_up() {
        let count = run(11, 11, 2, &[(7, 3), (3, 7)]).unwrap();
        assert_eq!(count.cells(), 26);
        assert_eq!(count.overlap, 0);
    }

    #[test]
    fn one_overlapping_pair_is_subtracted_once() {
        let count = run(11, 11, 2, &[(7, 5), (6, 5)]).unwrap();
        assert_eq!(count.ideal, 26);
        assert_eq!(count.overlap, 8);
        assert_eq!(count.cells(), 18);
    }

    #[test]
    fn clipped_but_separate_diamonds_stay_analytic() {
        let count = run(10, 10, 3, &[(0, 0), (9, 9)]).unwrap();
        assert_eq!(count.cells(), 20);
    }

    #[test]
    fn overlap_with_clipped_diamond_is_rejected() {
        let err = run(10, 10, 2, &[(1, 1), (0, 0)]).unwrap_err();
        assert!(matches!(err, Infeasible::ClippedOverlap { .. }));
    }

    #[test]
    fn chain_of_three_is_rejected() {
        let err = run(20, 20, 4, &[(5, 6), (5, 7), (5, 8)]).unwrap_err();
        assert!(matches!(err, Infeasible::MultiOverlap { .. }));
    }

    #[test]
    fn two_disjoint_pairs_are_fine() {
        let count = run(40, 40, 2, &[(10, 10), (10, 11), (30, 30), (31, 30)]).unwrap();
        assert_eq!(count.overlap, 2 * 8);
        assert_eq!(count.cells(), 36);
    }

    #[test]
    fn huge_single_diamond_stays_in_range() {
        let center = (50_000_000, 50_000_000);
        let count = run(100_000_000, 100_000_000, 5_000_000, &[center]).unwrap();
        assert_eq!(count.cells(), 50_000_010_000_001);
    }
}
