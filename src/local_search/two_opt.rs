//! Best-improvement 2-opt on an open path with pinned endpoints.
//!
//! # Algorithm
//!
//! For each pair of edges (i, i+1) and (j, j+1) with i < j, compute the
//! change in length from reversing the segment between them:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! Each pass scans every pair, applies the single most improving reversal of
//! `t[i+1..=j]`, and restarts from the beginning. The search stops when a
//! full pass finds no reversal that improves by more than `epsilon`.
//!
//! The first and last entries of the tour are never inside a reversed
//! segment, so a pinned start and end stay in place. A round trip is
//! represented by repeating the start index at the end.
//!
//! Among equally good reversals the first one found (lowest i, then lowest
//! j) is applied, which keeps results deterministic.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::{debug, trace, warn};

use crate::distance::DistanceMatrix;

/// Minimum improvement, in kilometers, for a reversal to count.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Limits for a 2-opt run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptParams {
    /// Reversals applied before giving up on convergence.
    pub max_passes: usize,
    /// Minimum improvement for a reversal to count.
    pub epsilon: f64,
}

impl Default for TwoOptParams {
    fn default() -> Self {
        Self {
            max_passes: 10_000,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Applies 2-opt improvement to a tour of location indices.
///
/// Returns the improved tour and its total open-path distance. The first and
/// last entries of `tour` keep their positions.
///
/// # Examples
///
/// ```
/// use route_opt::models::Location;
/// use route_opt::distance::DistanceMatrix;
/// use route_opt::local_search::{two_opt_improve, TwoOptParams};
///
/// let locations = vec![
///     Location::new("a", "A", 0.0, 0.0),
///     Location::new("b", "B", 0.0, 1.0),
///     Location::new("c", "C", 0.0, 2.0),
///     Location::new("d", "D", 0.0, 3.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
///
/// let (improved, _) = two_opt_improve(&[0, 2, 1, 3], &dm, TwoOptParams::default());
/// assert_eq!(improved, vec![0, 1, 2, 3]);
/// ```
pub fn two_opt_improve(
    tour: &[usize],
    distances: &DistanceMatrix,
    params: TwoOptParams,
) -> (Vec<usize>, f64) {
    let mut current = tour.to_vec();
    let initial = distances.path_distance(&current);

    // Need at least two interior positions for a reversal to change anything.
    if current.len() < 4 {
        return (current, initial);
    }

    let mut passes = 0;
    while let Some((i, j, gain)) = best_move(&current, distances, params.epsilon) {
        if passes >= params.max_passes {
            warn!(
                max_passes = params.max_passes,
                "2-opt stopped at pass limit before converging"
            );
            break;
        }
        trace!(i, j, gain_km = gain, "2-opt reversal");
        current[i + 1..=j].reverse();
        passes += 1;
    }

    let dist = distances.path_distance(&current);
    debug!(
        passes,
        initial_km = initial,
        final_km = dist,
        "2-opt finished"
    );
    (current, dist)
}

/// Returns `true` if no single 2-opt reversal shortens `tour` by more than
/// `epsilon`.
pub fn is_two_opt_local_optimum(tour: &[usize], distances: &DistanceMatrix, epsilon: f64) -> bool {
    best_move(tour, distances, epsilon).is_none()
}

/// Scans every admissible edge pair and returns the most improving reversal
/// as `(i, j, gain)`, or `None` if nothing beats `epsilon`.
fn best_move(tour: &[usize], distances: &DistanceMatrix, epsilon: f64) -> Option<(usize, usize, f64)> {
    let n = tour.len();
    if n < 4 {
        return None;
    }

    let mut best: Option<(usize, usize, f64)> = None;
    // Edge (j, j+1) must exist, so j <= n - 2; the last index is never reversed.
    for i in 0..n - 3 {
        for j in i + 2..n - 1 {
            let gain = -two_opt_delta(tour, distances, i, j);
            if gain > epsilon && best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((i, j, gain));
            }
        }
    }
    best
}

/// Change in length from reversing `tour[i+1..=j]`.
fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let (a, b) = (tour[i], tour[i + 1]);
    let (c, d) = (tour[j], tour[j + 1]);

    let old_cost = distances.get(a, b) + distances.get(c, d);
    let new_cost = distances.get(a, c) + distances.get(b, d);

    new_cost - old_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_locations(&[
            Location::new("a", "A", 0.0, 0.0),
            Location::new("b", "B", 0.0, 1.0),
            Location::new("c", "C", 1.0, 1.0),
            Location::new("d", "D", 1.0, 0.0),
        ])
    }

    fn line() -> DistanceMatrix {
        DistanceMatrix::from_locations(&[
            Location::new("a", "A", 0.0, 0.0),
            Location::new("b", "B", 0.0, 1.0),
            Location::new("c", "C", 0.0, 2.0),
            Location::new("d", "D", 0.0, 3.0),
            Location::new("e", "E", 0.0, 4.0),
        ])
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = line();
        let (improved, dist) = two_opt_improve(&[0, 1, 2, 3, 4], &dm, TwoOptParams::default());
        assert_eq!(improved, vec![0, 1, 2, 3, 4]);
        assert!((dist - dm.get(0, 4)).abs() < 1e-9);
    }

    #[test]
    fn test_2opt_uncrosses_square() {
        let dm = square();
        // a -> c -> b -> d -> a crosses the diagonals
        let crossed = [0, 2, 1, 3, 0];
        let (improved, dist) = two_opt_improve(&crossed, &dm, TwoOptParams::default());
        assert!(dist < dm.path_distance(&crossed));
        let perimeter = dm.path_distance(&[0, 1, 2, 3, 0]);
        assert!((dist - perimeter).abs() < 1e-9);
        assert_eq!(improved[0], 0);
        assert_eq!(*improved.last().expect("non-empty"), 0);
    }

    #[test]
    fn test_2opt_keeps_endpoints_pinned() {
        let dm = line();
        // Pinned end at c in the middle of the line
        let (improved, _) = two_opt_improve(&[0, 4, 1, 3, 2], &dm, TwoOptParams::default());
        assert_eq!(improved[0], 0);
        assert_eq!(improved[4], 2);
        let mut sorted = improved.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_2opt_short_tours_untouched() {
        let dm = line();
        assert_eq!(two_opt_improve(&[], &dm, TwoOptParams::default()).0, Vec::<usize>::new());
        assert_eq!(two_opt_improve(&[3], &dm, TwoOptParams::default()), (vec![3], 0.0));
        let (t, d) = two_opt_improve(&[0, 4, 2], &dm, TwoOptParams::default());
        assert_eq!(t, vec![0, 4, 2]);
        assert!((d - dm.path_distance(&[0, 4, 2])).abs() < 1e-12);
    }

    #[test]
    fn test_2opt_result_is_local_optimum() {
        let dm = line();
        let (improved, _) = two_opt_improve(&[0, 3, 1, 4, 2], &dm, TwoOptParams::default());
        assert!(is_two_opt_local_optimum(&improved, &dm, DEFAULT_EPSILON));
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let dm = square();
        let initial = [1, 3, 0, 2];
        let (_, improved_dist) = two_opt_improve(&initial, &dm, TwoOptParams::default());
        assert!(improved_dist <= dm.path_distance(&initial) + 1e-9);
    }

    #[test]
    fn test_2opt_pass_limit() {
        let dm = line();
        let params = TwoOptParams {
            max_passes: 0,
            ..TwoOptParams::default()
        };
        let (t, _) = two_opt_improve(&[0, 3, 1, 4, 2], &dm, params);
        assert_eq!(t, vec![0, 3, 1, 4, 2]);
    }

    #[test]
    fn test_delta_matches_recomputed_length() {
        let dm = line();
        let tour = [0, 3, 1, 4, 2];
        let before = dm.path_distance(&tour);
        let mut after = tour;
        after[1..=3].reverse();
        let delta = two_opt_delta(&tour, &dm, 0, 3);
        assert!((dm.path_distance(&after) - before - delta).abs() < 1e-9);
    }
}
