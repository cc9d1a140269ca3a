//! Location and time window types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time window during which a location expects the visit.
///
/// Arriving before `earliest` means waiting; arriving after `latest` is
/// reported as a violation but still produces a route.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use route_opt::models::TimeWindow;
///
/// let open = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
/// let close = Utc.with_ymd_and_hms(2024, 5, 6, 11, 0, 0).unwrap();
/// let tw = TimeWindow::new(open, close).unwrap();
/// assert!(!tw.is_violated(close));
/// assert!(TimeWindow::new(close, open).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest useful arrival.
    pub fn earliest(&self) -> DateTime<Utc> {
        self.earliest
    }

    /// Latest acceptable arrival.
    pub fn latest(&self) -> DateTime<Utc> {
        self.latest
    }

    /// Returns `true` if arriving at `at` misses the window.
    pub fn is_violated(&self, at: DateTime<Utc>) -> bool {
        at > self.latest
    }
}

/// A geocoded stop supplied by the caller.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
///
/// let office = Location::new("hq", "Head office", 52.52, 13.405);
/// assert_eq!(office.id(), "hq");
/// assert!(office.time_window().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_window: Option<TimeWindow>,
}

impl Location {
    /// Creates a new location without a time window.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            time_window: None,
        }
    }

    /// Sets a time window for this location.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Time window, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Returns `true` if both coordinates are finite and within their
    /// geographic ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
