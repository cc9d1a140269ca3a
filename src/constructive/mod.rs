//! Constructive heuristics for building an initial tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor from a fixed start, O(n²)
//! - [`nearest_neighbor_between`] — Same, with the final stop pinned

mod nearest_neighbor;

pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_between};
