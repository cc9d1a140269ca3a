//! Dense distance matrix.

use super::haversine_km;
use crate::models::Location;

/// Pairwise great-circle distances for one request, in kilometers.
///
/// Filled once from the request's locations so that construction and local
/// search look up leg lengths instead of recomputing haversine distances.
/// Rows are stored back to back; `get(i, j)` equals `get(j, i)`.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::new("a", "A", 0.0, 0.0),
///     Location::new("b", "B", 0.0, 1.0),
///     Location::new("c", "C", 1.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(0, 1) - 111.195).abs() < 1e-3);
/// assert_eq!(dm.get(2, 0), dm.get(0, 2));
/// assert_eq!(dm.path_distance(&[0, 1, 0]), 2.0 * dm.get(0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    km: Vec<f64>,
    stops: usize,
}

impl DistanceMatrix {
    /// Computes haversine distances between every pair of locations.
    pub fn from_locations(locations: &[Location]) -> Self {
        let stops = locations.len();
        let mut km = vec![0.0; stops * stops];
        for (i, a) in locations.iter().enumerate() {
            for (j, b) in locations.iter().enumerate().skip(i + 1) {
                let d = haversine_km(a, b);
                km[i * stops + j] = d;
                km[j * stops + i] = d;
            }
        }
        Self { km, stops }
    }

    /// Leg length between two stops.
    ///
    /// # Panics
    ///
    /// Panics if either index is not a stop of this request.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.km[from * self.stops + to]
    }

    /// Number of stops covered.
    pub fn size(&self) -> usize {
        self.stops
    }

    /// Sum of consecutive leg lengths along `tour`, as an open path.
    ///
    /// A round trip is expressed by repeating the start index at the end.
    pub fn path_distance(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
