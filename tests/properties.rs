use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::sample::Index;

use route_opt::constructive::{nearest_neighbor, nearest_neighbor_between};
use route_opt::distance::{haversine_km, DistanceMatrix};
use route_opt::local_search::{is_two_opt_local_optimum, two_opt_improve, TwoOptParams, DEFAULT_EPSILON};
use route_opt::models::Location;
use route_opt::request::{Algorithm, RouteRequest};
use route_opt::optimize_route;

fn coords() -> impl Strategy<Value = (f64, f64)> {
    (-60.0f64..60.0, -170.0f64..170.0)
}

fn locations(max: usize) -> impl Strategy<Value = Vec<Location>> {
    prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..max).prop_map(|pts| {
        pts.into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| Location::new(format!("s{i}"), format!("Stop {i}"), 45.0 + lat, 7.0 + lng))
            .collect()
    })
}

fn request(locations: Vec<Location>, start: usize, end: usize, algorithm: Algorithm) -> RouteRequest {
    RouteRequest::new(locations)
        .with_start_index(start)
        .with_end_index(end)
        .with_algorithm(algorithm)
        .with_start_time(Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap())
}

proptest! {
    #[test]
    fn haversine_zero_and_symmetric(a in coords(), b in coords()) {
        let la = Location::new("a", "A", a.0, a.1);
        let lb = Location::new("b", "B", b.0, b.1);
        prop_assert_eq!(haversine_km(&la, &la), 0.0);
        prop_assert_eq!(haversine_km(&la, &lb), haversine_km(&lb, &la));
        prop_assert!(haversine_km(&la, &lb) >= 0.0);
    }

    #[test]
    fn nearest_neighbor_is_permutation(locs in locations(15), start in any::<Index>()) {
        let n = locs.len();
        let start = start.index(n);
        let dm = DistanceMatrix::from_locations(&locs);
        let tour = nearest_neighbor(&dm, start);
        prop_assert_eq!(tour.len(), n);
        prop_assert_eq!(tour[0], start);
        let mut sorted = tour.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn two_opt_reaches_local_optimum(locs in locations(14), start in any::<Index>(), end in any::<Index>()) {
        let n = locs.len();
        let (start, end) = (start.index(n), end.index(n));
        let dm = DistanceMatrix::from_locations(&locs);
        let initial = nearest_neighbor_between(&dm, start, end);
        let (tour, dist) = two_opt_improve(&initial, &dm, TwoOptParams::default());
        prop_assert!(dist <= dm.path_distance(&initial) + DEFAULT_EPSILON);
        prop_assert!(is_two_opt_local_optimum(&tour, &dm, DEFAULT_EPSILON));
        prop_assert_eq!(tour[0], start);
        prop_assert_eq!(*tour.last().unwrap(), end);
    }

    #[test]
    fn two_opt_never_worse_than_nearest_neighbor(locs in locations(14), start in any::<Index>(), end in any::<Index>()) {
        let n = locs.len();
        let (start, end) = (start.index(n), end.index(n));
        let nn = optimize_route(&request(locs.clone(), start, end, Algorithm::NearestNeighbor)).unwrap();
        let opt = optimize_route(&request(locs, start, end, Algorithm::TwoOpt)).unwrap();
        prop_assert!(opt.total_distance_km() <= nn.total_distance_km() + 1e-9);
    }

    #[test]
    fn route_pins_endpoints_and_covers_every_stop(
        locs in locations(14),
        start in any::<Index>(),
        end in any::<Index>(),
        two_opt in any::<bool>(),
    ) {
        let n = locs.len();
        let (start, end) = (start.index(n), end.index(n));
        let algorithm = if two_opt { Algorithm::TwoOpt } else { Algorithm::NearestNeighbor };
        let route = optimize_route(&request(locs.clone(), start, end, algorithm)).unwrap();
        let ids = route.location_ids();

        prop_assert_eq!(ids[0], locs[start].id());
        prop_assert_eq!(*ids.last().unwrap(), locs[end].id());

        let round_trip = start == end && n > 1;
        prop_assert_eq!(ids.len(), if round_trip { n + 1 } else { n });
        let mut visited: Vec<&str> = ids[..n].to_vec();
        visited.sort_unstable();
        let mut expected: Vec<&str> = locs.iter().map(|l| l.id()).collect();
        expected.sort_unstable();
        prop_assert_eq!(visited, expected);

        for (i, w) in route.waypoints().iter().enumerate() {
            prop_assert_eq!(w.position, i);
        }
    }

    #[test]
    fn arrival_times_are_monotone(locs in locations(14), speed in 5.0f64..120.0) {
        let req = request(locs, 0, 0, Algorithm::TwoOpt).with_average_speed_kmh(speed);
        let route = optimize_route(&req).unwrap();
        let w = route.waypoints();
        prop_assert_eq!(w[0].arrival_time, req.start_time.unwrap());
        for pair in w.windows(2) {
            prop_assert!(pair[1].arrival_time >= pair[0].arrival_time);
            prop_assert!(pair[1].cumulative_distance_km >= pair[0].cumulative_distance_km);
        }
    }

    #[test]
    fn optimization_is_deterministic(locs in locations(14), end in any::<Index>()) {
        let end = end.index(locs.len());
        let req = request(locs, 0, end, Algorithm::TwoOpt);
        prop_assert_eq!(optimize_route(&req).unwrap(), optimize_route(&req).unwrap());
    }
}
