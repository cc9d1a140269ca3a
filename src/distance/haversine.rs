//! Great-circle distance and constant-speed travel time.

use crate::error::{Result, ValidationError};
use crate::models::Location;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two locations in kilometers.
///
/// Uses the haversine formula on a spherical Earth. Symmetric, and zero for
/// identical coordinates.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::distance::haversine_km;
///
/// let a = Location::new("a", "A", 0.0, 0.0);
/// let b = Location::new("b", "B", 0.0, 1.0);
/// let d = haversine_km(&a, &b);
/// assert!((d - 111.195).abs() < 1e-3);
/// assert_eq!(haversine_km(&a, &a), 0.0);
/// ```
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lng = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Travel time in minutes for a distance at a constant average speed.
///
/// Returns [`ValidationError::NonPositiveSpeed`] when the speed is zero,
/// negative, or not finite.
///
/// # Examples
///
/// ```
/// use route_opt::distance::travel_time_minutes;
///
/// assert_eq!(travel_time_minutes(15.0, 30.0).unwrap(), 30.0);
/// assert!(travel_time_minutes(15.0, 0.0).is_err());
/// ```
pub fn travel_time_minutes(distance_km: f64, average_speed_kmh: f64) -> Result<f64> {
    if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
        return Err(ValidationError::NonPositiveSpeed(average_speed_kmh).into());
    }
    Ok(distance_km / average_speed_kmh * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lng: f64) -> Location {
        Location::new("x", "X", lat, lng)
    }

    #[test]
    fn test_haversine_same_point() {
        let a = loc(36.1, -115.1);
        assert_eq!(haversine_km(&a, &a), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, roughly 370 km
        let d = haversine_km(&loc(36.17, -115.14), &loc(34.05, -118.24));
        assert!(d > 350.0 && d < 400.0, "LV to LA should be ~370km, got {}", d);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = loc(48.8566, 2.3522);
        let b = loc(51.5074, -0.1278);
        assert_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
    }

    #[test]
    fn test_haversine_antipodal() {
        let d = haversine_km(&loc(0.0, 0.0), &loc(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_travel_time() {
        // 10 km at 40 km/h = 15 minutes
        assert!((travel_time_minutes(10.0, 40.0).unwrap() - 15.0).abs() < 1e-10);
        assert_eq!(travel_time_minutes(0.0, 30.0).unwrap(), 0.0);
    }

    #[test]
    fn test_travel_time_rejects_bad_speed() {
        for speed in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(travel_time_minutes(1.0, speed).is_err(), "speed {speed}");
        }
    }
}
