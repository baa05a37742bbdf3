//! Shared-cell counts for two diamonds of equal radius.
//!
//! Cells are grouped into diagonal bars of constant `col - row`, running
//! northwest to southeast. In diagonal coordinates `u = row + col` and
//! `v = col - row`, a diamond of radius `n` is the square
//! `|u - u0| <= n, |v - v0| <= n`, restricted to lattice points where `u` and
//! `v` have the same parity. The lens where two diamonds meet is therefore
//! itself a square in `(u, v)`.
//!
//! Bar `v` holds the `u` values in the lens' `u` range that share `v`'s
//! parity, so summing the bars collapses to
//! `even(u) * even(v) + odd(u) * odd(v)`.

use covergrid_math::parity_counts;
use covergrid_types::{Diamond, Point};

fn diagonal_coords(p: Point) -> (i128, i128) {
    let row = i128::from(p.row);
    let col = i128::from(p.col);
    (row + col, col - row)
}

/// Whether the radius-`n` diamonds around `a` and `b` share a cell.
pub fn has_overlap(a: Point, b: Point, n: i64) -> bool {
    Diamond::new(a, n).intersects(&Diamond::new(b, n))
}

/// Cells shared by the radius-`n` diamonds around `a` and `b`.
///
/// Counts the ideal (unclipped) diamonds: callers must only compose this with
/// boundary losses when neither diamond is clipped. Returns zero for diamonds
/// that do not meet.
pub fn pairwise_overlap(a: Point, b: Point, n: i64) -> i128 {
    let n = i128::from(n);
    let (ua, va) = diagonal_coords(a);
    let (ub, vb) = diagonal_coords(b);

    let (u_even, u_odd) = parity_counts(ua.max(ub) - n, ua.min(ub) + n);
    let (v_even, v_odd) = parity_counts(va.max(vb) - n, va.min(vb) + n);

    u_even * v_even + u_odd * v_odd
}
