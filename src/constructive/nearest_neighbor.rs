//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from a fixed location, always move to
//! the nearest unvisited location. Ties go to the lowest location index so
//! the result is deterministic.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.

use tracing::trace;

use crate::distance::DistanceMatrix;

/// Builds a tour over every location, beginning at `start`.
///
/// Returns a permutation of `0..distances.size()` whose first element is
/// `start`. The end of the tour is wherever the greedy walk finishes.
///
/// # Panics
///
/// Panics if `start` is out of bounds.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::distance::DistanceMatrix;
/// use route_opt::constructive::nearest_neighbor;
///
/// let locations = vec![
///     Location::new("a", "A", 0.0, 0.0),
///     Location::new("b", "B", 0.0, 3.0),
///     Location::new("c", "C", 0.0, 1.0),
///     Location::new("d", "D", 0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert_eq!(nearest_neighbor(&dm, 0), vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = distances.size();
    let mut visited = vec![false; n];
    visited[start] = true;

    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    extend_greedy(distances, &mut tour, &mut visited);
    tour
}

/// Builds a tour from `start` to `end` through every other location.
///
/// Intermediate stops are chosen greedily and `end` is appended last. When
/// `end == start` and there is more than one location, the tour is a round
/// trip and has `n + 1` entries, with the start repeated at the end.
///
/// # Panics
///
/// Panics if `start` or `end` is out of bounds.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::distance::DistanceMatrix;
/// use route_opt::constructive::nearest_neighbor_between;
///
/// let locations = vec![
///     Location::new("a", "A", 0.0, 0.0),
///     Location::new("b", "B", 0.0, 1.0),
///     Location::new("c", "C", 0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert_eq!(nearest_neighbor_between(&dm, 0, 1), vec![0, 2, 1]);
/// assert_eq!(nearest_neighbor_between(&dm, 0, 0), vec![0, 1, 2, 0]);
/// ```
pub fn nearest_neighbor_between(distances: &DistanceMatrix, start: usize, end: usize) -> Vec<usize> {
    let n = distances.size();
    if n == 1 {
        return vec![start];
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    visited[end] = true;

    let mut tour = Vec::with_capacity(n + 1);
    tour.push(start);
    extend_greedy(distances, &mut tour, &mut visited);
    tour.push(end);
    tour
}

/// Appends unvisited locations to `tour` until none remain, always picking
/// the one closest to the current tail.
fn extend_greedy(distances: &DistanceMatrix, tour: &mut Vec<usize>, visited: &mut [bool]) {
    let Some(&first) = tour.last() else {
        return;
    };
    let mut current = first;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for (i, &seen) in visited.iter().enumerate() {
            if seen {
                continue;
            }
            let d = distances.get(current, i);
            // Strict comparison keeps the lowest index on ties.
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }

        match best {
            Some((next, d)) => {
                trace!(from = current, to = next, distance_km = d, "nearest neighbor step");
                visited[next] = true;
                tour.push(next);
                current = next;
            }
            None => break,
        }
    }
}
