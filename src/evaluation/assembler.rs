//! Route assembler that turns a tour into timed waypoints.

use chrono::{DateTime, Duration, Utc};

use crate::distance::{travel_time_minutes, DistanceMatrix};
use crate::error::{Result, ValidationError};
use crate::models::{Location, Route, TimeWindowViolation, Waypoint};
use crate::request::Algorithm;

/// Computes arrival times, per-leg and cumulative distances, and totals
/// for an ordered tour.
///
/// The clock starts at the requested start time and advances by the travel
/// time of each leg. Service time at a stop is not modelled. A stop reached
/// before its time window opens holds the clock until the window opens; a
/// stop reached after its window closes is reported as a violation.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use route_opt::models::Location;
/// use route_opt::distance::DistanceMatrix;
/// use route_opt::evaluation::RouteAssembler;
/// use route_opt::request::Algorithm;
///
/// let locations = vec![
///     Location::new("a", "A", 0.0, 0.0),
///     Location::new("b", "B", 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// let assembler = RouteAssembler::new(&locations, &dm, 30.0);
/// let start = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
///
/// let route = assembler.build_route(&[0, 1], start, Algorithm::NearestNeighbor).unwrap();
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.waypoints()[0].arrival_time, start);
/// assert!((route.total_distance_km() - 111.195).abs() < 1e-3);
/// ```
pub struct RouteAssembler<'a> {
    locations: &'a [Location],
    distances: &'a DistanceMatrix,
    average_speed_kmh: f64,
}

impl<'a> RouteAssembler<'a> {
    /// Creates a new assembler for the given request data.
    pub fn new(
        locations: &'a [Location],
        distances: &'a DistanceMatrix,
        average_speed_kmh: f64,
    ) -> Self {
        Self {
            locations,
            distances,
            average_speed_kmh,
        }
    }

    /// Builds a route from a tour of location indices.
    ///
    /// Fails if the average speed is not positive, or if an arrival time
    /// falls outside the calendar range `chrono` can represent.
    pub fn build_route(
        &self,
        tour: &[usize],
        start_time: DateTime<Utc>,
        algorithm: Algorithm,
    ) -> Result<Route> {
        let mut route = Route::new(algorithm);
        let mut elapsed_minutes = 0.0;
        let mut total_distance = 0.0;
        let mut prev: Option<usize> = None;

        for (position, &idx) in tour.iter().enumerate() {
            let location = &self.locations[idx];

            let (leg_distance, leg_minutes) = match prev {
                Some(p) => {
                    let d = self.distances.get(p, idx);
                    (d, travel_time_minutes(d, self.average_speed_kmh)?)
                }
                None => (0.0, 0.0),
            };
            total_distance += leg_distance;
            elapsed_minutes += leg_minutes;
            let arrival = minutes_to_duration(elapsed_minutes)
                .and_then(|offset| start_time.checked_add_signed(offset))
                .ok_or(ValidationError::ArrivalTimeOutOfRange { position })?;

            let mut wait_minutes = 0.0;
            if let Some(tw) = location.time_window() {
                if tw.is_violated(arrival) {
                    route.push_violation(TimeWindowViolation {
                        id: location.id().to_string(),
                        position,
                        arrival_time: arrival,
                        latest: tw.latest(),
                    });
                } else if arrival < tw.earliest() {
                    wait_minutes = duration_to_minutes(tw.earliest() - arrival);
                }
            }
            elapsed_minutes += wait_minutes;

            route.push_waypoint(Waypoint {
                location: location.clone(),
                position,
                arrival_time: arrival,
                cumulative_distance_km: total_distance,
                leg_distance_km: leg_distance,
                leg_duration_minutes: leg_minutes,
                wait_minutes,
            });

            prev = Some(idx);
        }

        route.set_total_distance_km(total_distance);
        route.set_total_duration_minutes(elapsed_minutes);
        Ok(route)
    }
}

/// Converts fractional minutes to a duration, rounded to the millisecond.
///
/// Returns `None` when the value does not fit a `Duration`.
fn minutes_to_duration(minutes: f64) -> Option<Duration> {
    let millis = (minutes * 60_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

fn duration_to_minutes(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 60_000.0
}
