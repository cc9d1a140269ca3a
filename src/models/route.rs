//! Route and waypoint types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Location;
use crate::request::Algorithm;

/// A location annotated with its place in an optimized route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// The visited location.
    #[serde(flatten)]
    pub location: Location,
    /// Zero-based position in the route.
    pub position: usize,
    /// Estimated arrival time.
    pub arrival_time: DateTime<Utc>,
    /// Distance travelled from the route start up to this waypoint.
    pub cumulative_distance_km: f64,
    /// Length of the leg ending at this waypoint (0 for the first).
    pub leg_distance_km: f64,
    /// Travel time of the leg ending at this waypoint (0 for the first).
    pub leg_duration_minutes: f64,
    /// Time spent waiting for the location's window to open.
    pub wait_minutes: f64,
}

/// A waypoint reached after its time window closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindowViolation {
    /// Location id.
    pub id: String,
    /// Position of the waypoint in the route.
    pub position: usize,
    /// Estimated arrival time.
    pub arrival_time: DateTime<Utc>,
    /// Closing time of the window that was missed.
    pub latest: DateTime<Utc>,
}

/// An ordered, timed sequence of waypoints for one team member's day.
///
/// The first waypoint is always the requested start location and the last
/// is always the requested end location. When start and end coincide and
/// there is more than one stop, the last waypoint is the return to the start.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use route_opt::models::{Location, Route, Waypoint};
/// use route_opt::request::Algorithm;
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
/// let mut route = Route::new(Algorithm::NearestNeighbor);
/// route.push_waypoint(Waypoint {
///     location: Location::new("hq", "Head office", 52.52, 13.405),
///     position: 0,
///     arrival_time: start,
///     cumulative_distance_km: 0.0,
///     leg_distance_km: 0.0,
///     leg_duration_minutes: 0.0,
///     wait_minutes: 0.0,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.location_ids(), vec!["hq"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(rename = "orderedLocations")]
    waypoints: Vec<Waypoint>,
    total_distance_km: f64,
    total_duration_minutes: f64,
    algorithm: Algorithm,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    time_window_violations: Vec<TimeWindowViolation>,
}

impl Route {
    /// Creates an empty route produced by the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            waypoints: Vec::new(),
            total_distance_km: 0.0,
            total_duration_minutes: 0.0,
            algorithm,
            time_window_violations: Vec::new(),
        }
    }

    /// Appends a waypoint to the end of this route.
    pub fn push_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    /// Records a missed time window.
    pub fn push_violation(&mut self, violation: TimeWindowViolation) {
        self.time_window_violations.push(violation);
    }

    /// Ordered waypoints.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if the route has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Location ids in visit order.
    pub fn location_ids(&self) -> Vec<&str> {
        self.waypoints.iter().map(|w| w.location.id()).collect()
    }

    /// Total travelled distance in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Total duration in minutes, travel plus any waiting.
    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_minutes
    }

    /// Algorithm that produced the ordering.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Waypoints reached after their window closed.
    pub fn time_window_violations(&self) -> &[TimeWindowViolation] {
        &self.time_window_violations
    }

    /// Sets the total distance (used by the assembler).
    pub fn set_total_distance_km(&mut self, d: f64) {
        self.total_distance_km = d;
    }

    /// Sets the total duration (used by the assembler).
    pub fn set_total_duration_minutes(&mut self, d: f64) {
        self.total_duration_minutes = d;
    }
}
