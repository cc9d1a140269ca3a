//! # route-opt
//!
//! Orders one team member's stops for a day and estimates arrival times.
//! Distances are great-circle (haversine) estimates and travel times assume
//! a constant average speed; there is no road network.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, TimeWindow, Waypoint, Route)
//! - [`distance`] — Haversine distance, travel time, distance matrix
//! - [`constructive`] — Nearest-neighbor tour construction
//! - [`local_search`] — 2-opt improvement with pinned endpoints
//! - [`evaluation`] — Route assembly with arrival times
//! - [`request`] — Requests, algorithm choice, JSON decoding
//! - [`config`] — Optimizer defaults and environment overrides
//! - [`error`] — Validation errors

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
mod optimizer;
pub mod request;

pub use error::{Result, RouteError, ValidationError};
pub use optimizer::{optimize_route, RouteOptimizer};
