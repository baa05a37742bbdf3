//! Out-of-grid cell counts for a single diamond.

use covergrid_math::{pyramid_cells, triangular_number};
use covergrid_types::{Grid, Point};

/// Rows of a diamond hanging past each grid edge.
///
/// "Rows" are counted perpendicular to the edge: for the left and right edges
/// they are columns. Each side's overhang is a pyramid of `k` rows, so it holds
/// `k²` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRows {
    pub top: i128,
    pub bottom: i128,
    pub left: i128,
    pub right: i128,
}

impl ClipRows {
    pub fn for_marker(grid: &Grid, n: i64, center: Point) -> Self {
        let n = i128::from(n);
        let row = i128::from(center.row);
        let col = i128::from(center.col);
        let height = i128::from(grid.height());
        let width = i128::from(grid.width());

        Self {
            top: (n - row).max(0),
            bottom: (row - (height - n - 1)).max(0),
            left: (n - col).max(0),
            right: (col - (width - n - 1)).max(0),
        }
    }

    pub fn is_clipped(&self) -> bool {
        self.top > 0 || self.bottom > 0 || self.left > 0 || self.right > 0
    }
}

/// Whether any cell of the diamond around `center` lies outside the grid.
pub fn is_clipped(grid: &Grid, n: i64, center: Point) -> bool {
    ClipRows::for_marker(grid, n, center).is_clipped()
}

/// Exact number of cells of the ideal diamond around `center` outside the grid.
///
/// Top and bottom overhangs never share a cell. A side overhang can share a
/// corner triangle with the top or bottom overhang: the cells beyond both
/// edges at once. A corner holds at most `n + 1` whole rows between the two
/// sides, so the shared triangle has `side + top - (n + 1)` rows when that is
/// positive.
pub fn boundary_loss(grid: &Grid, n: i64, center: Point) -> i128 {
    let rows = ClipRows::for_marker(grid, n, center);
    let whole_rows = i128::from(n) + 1;

    let side_loss = |side: i128| -> i128 {
        if side == 0 {
            return 0;
        }
        let shared_top = (side + rows.top - whole_rows).max(0);
        let shared_bottom = (side + rows.bottom - whole_rows).max(0);
        pyramid_cells(side) - triangular_number(shared_top) - triangular_number(shared_bottom)
    };

    pyramid_cells(rows.top)
        + pyramid_cells(rows.bottom)
        + side_loss(rows.left)
        + side_loss(rows.right)
}
