//! Optimization requests: algorithm choice, defaults, and JSON decoding.
//!
//! Requests arrive from a request-handling layer as JSON. Decoding walks the
//! document by hand so that each kind of bad input maps to its own
//! [`ValidationError`] variant.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::models::{Location, TimeWindow};

/// Ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Nearest-neighbor construction refined by 2-opt.
    #[default]
    #[serde(rename = "2opt")]
    TwoOpt,
    /// Nearest-neighbor construction only.
    #[serde(rename = "nearest-neighbor")]
    NearestNeighbor,
}

impl Algorithm {
    /// Wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoOpt => "2opt",
            Self::NearestNeighbor => "nearest-neighbor",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "2opt" => Ok(Self::TwoOpt),
            "nearest-neighbor" => Ok(Self::NearestNeighbor),
            other => Err(ValidationError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// A request to order one day's stops.
///
/// Optional fields fall back to defaults when the request is optimized:
/// the end index defaults to the start index, the start time to now, and
/// the algorithm and speed to the optimizer's configuration.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::request::{Algorithm, RouteRequest};
///
/// let request = RouteRequest::new(vec![
///     Location::new("hq", "Head office", 52.52, 13.405),
///     Location::new("c1", "Customer 1", 52.50, 13.39),
/// ])
/// .with_algorithm(Algorithm::NearestNeighbor)
/// .with_average_speed_kmh(25.0);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Stops to order.
    pub locations: Vec<Location>,
    /// Index of the first stop.
    pub start_location_index: usize,
    /// Index of the last stop, defaults to the start.
    pub end_location_index: Option<usize>,
    /// Departure time, defaults to now.
    pub start_time: Option<DateTime<Utc>>,
    /// Ordering strategy, defaults to the optimizer's configuration.
    pub algorithm: Option<Algorithm>,
    /// Average travel speed, defaults to the optimizer's configuration.
    pub average_speed_kmh: Option<f64>,
}

impl RouteRequest {
    /// Creates a request starting and ending at the first location.
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            start_location_index: 0,
            end_location_index: None,
            start_time: None,
            algorithm: None,
            average_speed_kmh: None,
        }
    }

    /// Sets the start location index.
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_location_index = index;
        self
    }

    /// Sets the end location index.
    pub fn with_end_index(mut self, index: usize) -> Self {
        self.end_location_index = Some(index);
        self
    }

    /// Sets the departure time.
    pub fn with_start_time(mut self, at: DateTime<Utc>) -> Self {
        self.start_time = Some(at);
        self
    }

    /// Sets the ordering strategy.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets the average travel speed.
    pub fn with_average_speed_kmh(mut self, speed: f64) -> Self {
        self.average_speed_kmh = Some(speed);
        self
    }

    /// Index of the last stop after applying the default.
    pub fn end_index(&self) -> usize {
        self.end_location_index.unwrap_or(self.start_location_index)
    }

    /// Decodes a request from a JSON string.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ValidationError::Json(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Decodes a request from a JSON document.
    ///
    /// Only shape errors are reported here; call [`RouteRequest::validate`]
    /// for range and consistency checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use route_opt::error::ValidationError;
    /// use route_opt::request::RouteRequest;
    ///
    /// let err = RouteRequest::from_json(&json!({
    ///     "locations": [{ "id": "a", "name": "A", "latitude": "north", "longitude": 0 }]
    /// }))
    /// .unwrap_err();
    /// assert!(matches!(err.validation(), Some(ValidationError::MalformedLocation { index: 0, .. })));
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(ValidationError::InvalidField {
            field: "request",
            expected: "an object",
        })?;

        let entries = match obj.get("locations") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ValidationError::MissingLocations.into()),
        };
        let locations = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_location(index, entry))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let start_location_index = match optional(obj, "startLocationIndex") {
            Some(v) => parse_index("startLocationIndex", v, locations.len())?,
            None => 0,
        };
        let end_location_index = optional(obj, "endLocationIndex")
            .map(|v| parse_index("endLocationIndex", v, locations.len()))
            .transpose()?;

        let start_time = optional(obj, "startTime")
            .map(|v| {
                let s = v.as_str().ok_or(ValidationError::InvalidField {
                    field: "startTime",
                    expected: "an ISO-8601 string",
                })?;
                parse_timestamp(s).ok_or_else(|| ValidationError::InvalidStartTime(s.to_string()))
            })
            .transpose()?;

        let algorithm = optional(obj, "algorithm")
            .map(|v| {
                v.as_str()
                    .ok_or(ValidationError::InvalidField {
                        field: "algorithm",
                        expected: "a string",
                    })?
                    .parse::<Algorithm>()
            })
            .transpose()?;

        let average_speed_kmh = optional(obj, "averageSpeedKmh")
            .map(|v| {
                v.as_f64().ok_or(ValidationError::InvalidField {
                    field: "averageSpeedKmh",
                    expected: "a number",
                })
            })
            .transpose()?;

        Ok(Self {
            locations,
            start_location_index,
            end_location_index,
            start_time,
            algorithm,
            average_speed_kmh,
        })
    }

    /// Checks every input constraint without computing anything.
    pub fn validate(&self) -> Result<()> {
        let len = self.locations.len();
        if len == 0 {
            return Err(ValidationError::EmptyLocations.into());
        }

        let mut seen = HashSet::with_capacity(len);
        for (index, loc) in self.locations.iter().enumerate() {
            if loc.id().is_empty() {
                return Err(ValidationError::MalformedLocation {
                    index,
                    reason: "id must not be empty".to_string(),
                }
                .into());
            }
            if !loc.has_valid_coordinates() {
                return Err(ValidationError::CoordinateOutOfRange {
                    index,
                    latitude: loc.latitude(),
                    longitude: loc.longitude(),
                }
                .into());
            }
            if let Some(tw) = loc.time_window() {
                if tw.earliest() > tw.latest() {
                    return Err(ValidationError::InvertedTimeWindow { index }.into());
                }
            }
            if !seen.insert(loc.id()) {
                return Err(ValidationError::DuplicateLocationId {
                    id: loc.id().to_string(),
                }
                .into());
            }
        }

        check_index("startLocationIndex", self.start_location_index, len)?;
        check_index("endLocationIndex", self.end_index(), len)?;

        if let Some(speed) = self.average_speed_kmh {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(ValidationError::NonPositiveSpeed(speed).into());
            }
        }
        Ok(())
    }
}

/// Returns the field's value unless it is absent or `null`.
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn check_index(field: &'static str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ValidationError::IndexOutOfRange {
            field,
            value: index as i128,
            len,
        }
        .into());
    }
    Ok(())
}

fn parse_index(field: &'static str, value: &Value, len: usize) -> Result<usize> {
    let raw = match (value.as_i64(), value.as_u64()) {
        (Some(v), _) => i128::from(v),
        (None, Some(v)) => i128::from(v),
        _ => {
            return Err(ValidationError::InvalidField {
                field,
                expected: "an integer",
            }
            .into())
        }
    };
    usize::try_from(raw).map_err(|_| {
        ValidationError::IndexOutOfRange {
            field,
            value: raw,
            len,
        }
        .into()
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn parse_location(index: usize, entry: &Value) -> std::result::Result<Location, ValidationError> {
    let malformed = |reason: &str| ValidationError::MalformedLocation {
        index,
        reason: reason.to_string(),
    };

    let obj = entry
        .as_object()
        .ok_or_else(|| malformed("expected an object"))?;
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing id"))?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing name"))?;
    let latitude = obj
        .get("latitude")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed("latitude must be a number"))?;
    let longitude = obj
        .get("longitude")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed("longitude must be a number"))?;

    let mut location = Location::new(id, name, latitude, longitude);

    if let Some(tw) = obj.get("timeWindow").filter(|v| !v.is_null()) {
        let bound = |key: &str| {
            tw.get(key)
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
                .ok_or_else(|| malformed("timeWindow needs ISO-8601 earliest and latest"))
        };
        let window = TimeWindow::new(bound("earliest")?, bound("latest")?)
            .ok_or(ValidationError::InvertedTimeWindow { index })?;
        location = location.with_time_window(window);
    }

    Ok(location)
}
