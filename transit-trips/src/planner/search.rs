//! Breadth-first trip search.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::domain::{Route, RouteId, Stop};
use crate::network::TransitGraph;

/// Find a sequence of routes connecting `origin` to `destination`.
///
/// The result is the path with the fewest route segments; consecutive
/// routes always share at least one stop, the first route serves
/// `origin` and the last serves `destination`. The empty sequence means
/// no connection exists, or one of the stops is not part of `graph`.
///
/// Two behaviors are deliberate and worth knowing:
///
/// - Ties between equal-length paths resolve deterministically to the
///   lexicographically smallest sequence of route ids, because membership
///   sets iterate in id order. Networks with several shortest paths give
///   the same answer on every run.
/// - `origin == destination` returns a one-route path through the
///   first route serving that stop, since a stop trivially lies on all
///   of its own routes. Callers wanting "no travel needed" semantics
///   should compare the stops before asking.
///
/// The search runs iteratively over an explicit frontier of
/// (route, path-so-far) frames, so deep networks cannot overflow the
/// call stack. See the module docs for the complexity caveat.
///
/// # Examples
///
/// ```
/// use transit_trips::network::{RouteRecord, StopRecord, TransitGraph};
/// use transit_trips::planner::find_trip;
///
/// let graph = TransitGraph::build(vec![
///     (
///         RouteRecord::new("Red", "Red Line"),
///         vec![
///             StopRecord::new("place-asmnl", "Ashmont"),
///             StopRecord::new("place-pktrm", "Park Street"),
///         ],
///     ),
///     (
///         RouteRecord::new("Green-B", "Green Line B"),
///         vec![
///             StopRecord::new("place-pktrm", "Park Street"),
///             StopRecord::new("place-armnl", "Arlington"),
///         ],
///     ),
/// ]);
///
/// let ashmont = graph.stop("Ashmont").unwrap();
/// let arlington = graph.stop("Arlington").unwrap();
/// let names: Vec<_> = find_trip(&graph, ashmont, arlington)
///     .iter()
///     .map(|route| route.to_string())
///     .collect();
/// assert_eq!(names, ["Red Line", "Green Line B"]);
/// ```
pub fn find_trip<'g>(
    graph: &'g TransitGraph,
    origin: &Stop,
    destination: &Stop,
) -> Vec<&'g Route> {
    // Canonicalize through the arena: callers may hold clones, and a stop
    // unknown to this graph means an empty result, not an error.
    let (Some(origin), Some(destination)) = (
        graph.stop_by_id(&origin.id),
        graph.stop_by_id(&destination.id),
    ) else {
        return Vec::new();
    };

    debug!(origin = %origin.id, destination = %destination.id, "searching for trip");

    // Frames are (candidate route, routes taken before it). FIFO order
    // means frames are examined shortest-path-first, so the first route
    // found serving the destination terminates the search.
    let mut frontier: VecDeque<(RouteId, Vec<RouteId>)> = origin
        .route_ids()
        .map(|id| (id.clone(), Vec::new()))
        .collect();
    let mut examined = 0usize;

    while let Some((current, mut path)) = frontier.pop_front() {
        let Some(route) = graph.route_by_id(&current) else {
            continue;
        };
        path.push(current);
        examined += 1;

        if route.serves(&destination.id) {
            debug!(hops = path.len(), examined, "trip found");
            return resolve(graph, &path);
        }

        // Candidate next routes: everything reachable from this route's
        // stops that is not already on the path. Collecting into a sorted
        // set both fixes the expansion order and collapses duplicates
        // reachable through several shared stops.
        let mut next_routes: BTreeSet<&RouteId> = BTreeSet::new();
        for stop_id in route.stop_ids() {
            let Some(stop) = graph.stop_by_id(stop_id) else {
                continue;
            };
            next_routes.extend(stop.route_ids().filter(|&next| !path.contains(next)));
        }
        for next in next_routes {
            frontier.push_back((next.clone(), path.clone()));
        }
    }

    debug!(examined, "no connecting trip");
    Vec::new()
}

/// Map a path of route ids back to arena references.
fn resolve<'g>(graph: &'g TransitGraph, path: &[RouteId]) -> Vec<&'g Route> {
    path.iter()
        .filter_map(|id| graph.route_by_id(id))
        .collect()
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::network::{RouteRecord, StopRecord, TransitGraph};

    const STOP_POOL: [&str; 8] = ["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7"];

    /// Up to six routes, each serving a non-empty subset of the stop pool.
    fn network_strategy() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
        prop::collection::vec(
            prop::collection::btree_set(prop::sample::select(STOP_POOL.to_vec()), 1..5),
            1..6,
        )
        .prop_map(|routes| {
            routes
                .into_iter()
                .map(|stops| stops.into_iter().collect())
                .collect()
        })
    }

    fn build(routes: &[Vec<&str>]) -> TransitGraph {
        TransitGraph::build(
            routes
                .iter()
                .enumerate()
                .map(|(i, stops)| {
                    (
                        RouteRecord::new(format!("r{i}"), format!("Route {i}")),
                        stops.iter().map(|s| StopRecord::new(*s, *s)).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Reference reachability: expand the set of reachable stops through
    /// route membership until it stops growing.
    fn connected(graph: &TransitGraph, origin: &Stop, destination: &Stop) -> bool {
        let mut reachable = std::collections::BTreeSet::new();
        reachable.insert(origin.id.clone());
        loop {
            let before = reachable.len();
            for route in graph.routes() {
                if route.stop_ids().any(|s| reachable.contains(s)) {
                    reachable.extend(route.stop_ids().cloned());
                }
            }
            if reachable.len() == before {
                break;
            }
        }
        reachable.contains(&destination.id)
    }

    proptest! {
        /// Whatever the generated topology, a returned trip is valid:
        /// endpoints covered, consecutive routes share a stop, no route
        /// repeats.
        #[test]
        fn trips_are_well_formed(routes in network_strategy(), a in 0usize..8, b in 0usize..8) {
            let graph = build(&routes);
            let stops: Vec<_> = graph.stops().collect();
            prop_assume!(!stops.is_empty());
            let origin = stops[a % stops.len()];
            let destination = stops[b % stops.len()];

            let trip = find_trip(&graph, origin, destination);
            if let (Some(first), Some(last)) = (trip.first(), trip.last()) {
                prop_assert!(first.serves(&origin.id));
                prop_assert!(last.serves(&destination.id));
                for pair in trip.windows(2) {
                    prop_assert!(
                        pair[0].stop_ids().any(|s| pair[1].serves(s)),
                        "consecutive routes {} and {} share no stop",
                        pair[0].id,
                        pair[1].id
                    );
                }
                let mut seen = std::collections::BTreeSet::new();
                for route in &trip {
                    prop_assert!(seen.insert(&route.id), "route {} repeats", route.id);
                }
            }
        }

        /// A trip exists exactly when the stops are connected.
        #[test]
        fn found_iff_connected(routes in network_strategy(), a in 0usize..8, b in 0usize..8) {
            let graph = build(&routes);
            let stops: Vec<_> = graph.stops().collect();
            prop_assume!(!stops.is_empty());
            let origin = stops[a % stops.len()];
            let destination = stops[b % stops.len()];

            let trip = find_trip(&graph, origin, destination);
            prop_assert_eq!(!trip.is_empty(), connected(&graph, origin, destination));
        }

        /// Membership stays bidirectional over arbitrary built networks.
        #[test]
        fn membership_is_bidirectional(routes in network_strategy()) {
            let graph = build(&routes);
            for route in graph.routes() {
                for stop_id in route.stop_ids() {
                    let stop = graph.stop_by_id(stop_id);
                    prop_assert!(stop.is_some_and(|s| s.is_on(&route.id)));
                }
            }
            for stop in graph.stops() {
                for route_id in stop.route_ids() {
                    let route = graph.route_by_id(route_id);
                    prop_assert!(route.is_some_and(|r| r.serves(&stop.id)));
                }
            }
        }
    }
}
