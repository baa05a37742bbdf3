//! Closed-form cell-count helpers.
//!
//! A diamond of radius `n` splits into two stacked square pyramids: `n` rows
//! above the center row and `n + 1` rows from the center row down. A pyramid
//! of `k` rows has `1 + 3 + ... + (2k - 1) = k²` cells.
//!
//! ```text
//!         1
//!       1 1 1
//!     1 1 1 1 1     pyramid of height n
//!   -------------
//!   1 1 1 X 1 1 1   pyramid of height n + 1
//!     1 1 1 1 1
//!       1 1 1
//!         1
//! ```

#![forbid(unsafe_code)]

/// Cells in a square pyramid of `rows` rows (sum of the first `rows` odd numbers).
#[must_use]
pub fn pyramid_cells(rows: i128) -> i128 {
    rows * rows
}

/// `k (k + 1) / 2`: cells in a right triangle whose legs are `k` cells long.
#[must_use]
pub fn triangular_number(k: i128) -> i128 {
    k * (k + 1) / 2
}

/// Cells in an unclipped diamond of radius `n`.
#[must_use]
pub fn ideal_diamond_size(n: i128) -> i128 {
    pyramid_cells(n) + pyramid_cells(n + 1)
}

/// Return `(even, odd)`: how many integers of each parity lie in `[lo, hi]`.
///
/// An empty range (`hi < lo`) yields `(0, 0)`. Negative bounds are fine.
#[must_use]
pub fn parity_counts(lo: i128, hi: i128) -> (i128, i128) {
    if hi < lo {
        return (0, 0);
    }
    let even = hi.div_euclid(2) - (lo - 1).div_euclid(2);
    (even, hi - lo + 1 - even)
}
