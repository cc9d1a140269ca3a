//! Route optimizer: validation, construction, improvement, assembly.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, info_span};

use crate::config::OptimizerConfig;
use crate::constructive::nearest_neighbor_between;
use crate::distance::DistanceMatrix;
use crate::error::{Result, RouteError, ValidationError};
use crate::evaluation::RouteAssembler;
use crate::local_search::two_opt_improve;
use crate::models::Route;
use crate::request::{Algorithm, RouteRequest};

/// Orders a day's stops and estimates arrival times.
///
/// Holds only immutable configuration, so one optimizer can serve any
/// number of concurrent requests.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use route_opt::models::Location;
/// use route_opt::request::RouteRequest;
/// use route_opt::RouteOptimizer;
///
/// let request = RouteRequest::new(vec![
///     Location::new("depot", "Depot", 0.0, 0.0),
///     Location::new("c", "Corner", 1.0, 1.0),
///     Location::new("b", "North", 0.0, 1.0),
///     Location::new("d", "East", 1.0, 0.0),
/// ])
/// .with_start_time(Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap());
///
/// let route = RouteOptimizer::default().optimize(&request).unwrap();
/// assert_eq!(route.location_ids(), vec!["depot", "b", "c", "d", "depot"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    /// Creates an optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The optimizer's configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Validates the request and returns the optimized route.
    ///
    /// Nothing is computed unless every input check passes.
    pub fn optimize(&self, request: &RouteRequest) -> Result<Route> {
        request.validate()?;

        let algorithm = request.algorithm.unwrap_or(self.config.default_algorithm);
        let speed = request
            .average_speed_kmh
            .unwrap_or(self.config.default_average_speed_kmh);
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ValidationError::NonPositiveSpeed(speed).into());
        }
        let start = request.start_location_index;
        let end = request.end_index();
        let start_time = request.start_time.unwrap_or_else(Utc::now);

        let span = info_span!(
            "optimize_route",
            stops = request.locations.len(),
            %algorithm,
            start,
            end
        );
        let _guard = span.enter();

        let distances = DistanceMatrix::from_locations(&request.locations);
        let initial = nearest_neighbor_between(&distances, start, end);
        debug!(
            distance_km = distances.path_distance(&initial),
            "nearest-neighbor tour built"
        );

        let tour = match algorithm {
            Algorithm::NearestNeighbor => initial,
            Algorithm::TwoOpt => {
                two_opt_improve(&initial, &distances, self.config.two_opt_params()).0
            }
        };

        let route = RouteAssembler::new(&request.locations, &distances, speed)
            .build_route(&tour, start_time, algorithm)?;
        info!(
            total_distance_km = route.total_distance_km(),
            total_duration_minutes = route.total_duration_minutes(),
            "route optimized"
        );
        Ok(route)
    }

    /// Decodes a JSON request, optimizes it, and encodes the route as JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use route_opt::RouteOptimizer;
    ///
    /// let response = RouteOptimizer::default()
    ///     .optimize_json(&json!({
    ///         "locations": [
    ///             { "id": "a", "name": "A", "latitude": 0.0, "longitude": 0.0 },
    ///             { "id": "b", "name": "B", "latitude": 0.0, "longitude": 1.0 }
    ///         ],
    ///         "endLocationIndex": 1,
    ///         "startTime": "2024-05-06T08:00:00Z"
    ///     }))
    ///     .unwrap();
    /// assert_eq!(response["algorithm"], "2opt");
    /// assert_eq!(response["orderedLocations"][1]["id"], "b");
    /// ```
    pub fn optimize_json(&self, body: &Value) -> Result<Value> {
        let request = RouteRequest::from_json(body)?;
        let route = self.optimize(&request)?;
        serde_json::to_value(&route).map_err(|e| RouteError::Encoding(e.to_string()))
    }
}

/// Optimizes a request with the default configuration.
pub fn optimize_route(request: &RouteRequest) -> Result<Route> {
    RouteOptimizer::default().optimize(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::TimeZone;

    fn request(locations: Vec<Location>) -> RouteRequest {
        RouteRequest::new(locations).with_start_time(Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap())
    }

    #[test]
    fn test_single_location() {
        let route = optimize_route(&request(vec![Location::new("a", "A", 10.0, 10.0)])).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route.total_distance_km(), 0.0);
        assert_eq!(route.total_duration_minutes(), 0.0);
    }

    #[test]
    fn test_defaults_applied() {
        let req = request(vec![
            Location::new("a", "A", 0.0, 0.0),
            Location::new("b", "B", 0.0, 1.0),
        ])
        .with_end_index(1);
        let route = optimize_route(&req).unwrap();
        assert_eq!(route.algorithm(), Algorithm::TwoOpt);
        // 30 km/h: two minutes per kilometer
        assert!((route.total_duration_minutes() - 2.0 * route.total_distance_km()).abs() < 1e-9);
    }

    #[test]
    fn test_configured_defaults() {
        let optimizer = RouteOptimizer::new(OptimizerConfig {
            default_average_speed_kmh: 60.0,
            default_algorithm: Algorithm::NearestNeighbor,
            ..OptimizerConfig::default()
        });
        let req = request(vec![
            Location::new("a", "A", 0.0, 0.0),
            Location::new("b", "B", 0.0, 1.0),
        ]);
        let route = optimizer.optimize(&req).unwrap();
        assert_eq!(route.algorithm(), Algorithm::NearestNeighbor);
        assert!((route.total_duration_minutes() - route.total_distance_km()).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_request_rejected() {
        let req = request(vec![Location::new("a", "A", 0.0, 0.0)]).with_average_speed_kmh(-1.0);
        let err = optimize_route(&req).unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::NonPositiveSpeed(-1.0)));
    }

    #[test]
    fn test_bad_configured_speed_rejected() {
        let optimizer = RouteOptimizer::new(OptimizerConfig {
            default_average_speed_kmh: 0.0,
            ..OptimizerConfig::default()
        });
        let req = request(vec![Location::new("a", "A", 0.0, 0.0)]);
        assert!(optimizer.optimize(&req).is_err());
    }

    #[test]
    fn test_distinct_end_is_last() {
        let req = request(vec![
            Location::new("a", "A", 0.0, 0.0),
            Location::new("b", "B", 0.0, 1.0),
            Location::new("c", "C", 0.0, 2.0),
            Location::new("d", "D", 0.0, 3.0),
        ])
        .with_end_index(1);
        let route = optimize_route(&req).unwrap();
        let ids = route.location_ids();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], "a");
        assert_eq!(ids[3], "b");
    }
}
