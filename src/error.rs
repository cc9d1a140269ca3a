//! Error types.
//!
//! The engine performs no I/O, so the only way a call can fail is a bad
//! request. Every failure is reported before any computation starts.

use thiserror::Error;

/// A single reason a route request was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// `locations` was absent or not a list.
    #[error("locations must be provided as a list")]
    MissingLocations,
    /// `locations` was an empty list.
    #[error("locations must not be empty")]
    EmptyLocations,
    /// A location entry was not an object, or lacked a usable field.
    #[error("location {index} is malformed: {reason}")]
    MalformedLocation {
        /// Position of the entry in the request.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("location {index} has out-of-range coordinates ({latitude}, {longitude})")]
    CoordinateOutOfRange {
        /// Position of the entry in the request.
        index: usize,
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
    /// Two locations share the same id.
    #[error("location id {id:?} appears more than once")]
    DuplicateLocationId {
        /// The repeated id.
        id: String,
    },
    /// A time window closes before it opens.
    #[error("location {index} has a time window that closes before it opens")]
    InvertedTimeWindow {
        /// Position of the entry in the request.
        index: usize,
    },
    /// `startLocationIndex` or `endLocationIndex` does not address a location.
    #[error("{field} {value} is out of range for {len} locations")]
    IndexOutOfRange {
        /// Request field name.
        field: &'static str,
        /// Value supplied by the caller.
        value: i128,
        /// Number of locations.
        len: usize,
    },
    /// A request field had the wrong JSON type.
    #[error("{field} must be {expected}")]
    InvalidField {
        /// Request field name.
        field: &'static str,
        /// Human-readable expected type.
        expected: &'static str,
    },
    /// Average speed was zero, negative, or not finite.
    #[error("averageSpeedKmh must be a positive number, got {0}")]
    NonPositiveSpeed(f64),
    /// Algorithm name not recognised.
    #[error("unknown algorithm {0:?}, expected \"2opt\" or \"nearest-neighbor\"")]
    UnknownAlgorithm(String),
    /// `startTime` could not be parsed as ISO-8601.
    #[error("startTime {0:?} is not a valid ISO-8601 timestamp")]
    InvalidStartTime(String),
    /// Request body was not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    Json(String),
    /// An estimated arrival falls outside the representable calendar range,
    /// usually because the average speed is vanishingly small.
    #[error("arrival time at position {position} is out of range; check averageSpeedKmh and startTime")]
    ArrivalTimeOutOfRange {
        /// Route position whose arrival could not be represented.
        position: usize,
    },
}

/// Errors returned by the route optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The request failed validation; nothing was computed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    /// A computed route could not be encoded as JSON.
    #[error("failed to encode route: {0}")]
    Encoding(String),
}

impl RouteError {
    /// Returns the underlying validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::InvalidInput(e) => Some(e),
            Self::Encoding(_) => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RouteError>;
