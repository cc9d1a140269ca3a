//! Distance and travel time model.
//!
//! Haversine great-circle distances, constant-speed travel times, and a
//! dense matrix of pairwise distances.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, travel_time_minutes, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
