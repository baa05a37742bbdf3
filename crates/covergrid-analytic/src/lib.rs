//! # covergrid-analytic
//!
//! **Tier 2 (Closed-Form Counting)**
//!
//! Counts covered cells without iterating over them:
//! `Σ ideal diamond size − Σ boundary loss − Σ pairwise overlap`.
//!
//! ## What belongs here
//! * Boundary-loss arithmetic for one clipped diamond
//! * Pairwise overlap of two unclipped diamonds
//! * The feasibility scan that decides when the composition is exact
//!
//! ## What does NOT belong here
//! * Cell enumeration (see `covergrid-enumerate`)
//! * Choosing between paths (see `covergrid-core`)
//!
//! ## Example
//! ```
//! use covergrid_analytic::analytic_count;
//! use covergrid_normalize::normalize_markers;
//! use covergrid_types::{Grid, Point};
//!
//! let grid = Grid::new(11, 11).unwrap();
//! let markers = normalize_markers(&grid, [Point::new(7, 5), Point::new(6, 5)]);
//! let count = analytic_count(&grid, 2, &markers).unwrap();
//! assert_eq!(count.cells(), 18);
//! ```

#![forbid(unsafe_code)]

mod boundary;
mod feasibility;
mod overlap;

pub use boundary::{ClipRows, boundary_loss, is_clipped};
pub use feasibility::{AnalyticCount, analytic_count};
pub use overlap::{has_overlap, pairwise_overlap};
