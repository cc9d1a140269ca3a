//! Domain model types for single-route optimization.
//!
//! Provides geocoded locations with optional time windows, and the
//! timed waypoints and routes the optimizer returns.

mod location;
mod route;

pub use location::{Location, TimeWindow};
pub use route::{Route, TimeWindowViolation, Waypoint};
