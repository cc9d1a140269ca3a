//! Local search operators for improving a tour.
//!
//! - [`two_opt_improve`] — Best-improvement 2-opt with pinned endpoints

mod two_opt;

pub use two_opt::{is_two_opt_local_optimum, two_opt_improve, TwoOptParams, DEFAULT_EPSILON};
