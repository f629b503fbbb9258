//! The in-memory route/stop graph.
//!
//! [`TransitGraph`] is an arena: it owns every [`Route`] and [`Stop`] in
//! one transit system, keyed by id, and the entities reference each other
//! by id sets rather than pointers. Built once, read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Route, RouteId, Stop, StopId};

use super::source::{RouteRecord, StopRecord};

impl From<RouteRecord> for Route {
    fn from(record: RouteRecord) -> Self {
        let mut route = Route::new(record.id, record.long_name);
        route.short_name = record.short_name;
        route.route_type = record.route_type;
        route.color = record.color;
        route.text_color = record.text_color;
        route.description = record.description;
        route.fare_class = record.fare_class;
        route.sort_order = record.sort_order;
        route.direction_names = record.direction_names;
        route.direction_destinations = record.direction_destinations;
        route
    }
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        let mut stop = Stop::new(record.id, record.name);
        stop.latitude = record.latitude;
        stop.longitude = record.longitude;
        stop.municipality = record.municipality;
        stop.description = record.description;
        stop.address = record.address;
        stop.platform_name = record.platform_name;
        stop.wheelchair_boarding = record.wheelchair_boarding;
        stop
    }
}

/// Lookup key: trimmed and lowercased, so lookups are case-insensitive
/// over both ids and display names.
fn normalize(ident: &str) -> String {
    ident.trim().to_lowercase()
}

/// A fully-built transit network graph.
///
/// Routes and stops live in id-keyed sorted maps; every route's stop set
/// and every stop's route set were linked together at build time, so
/// membership is always bidirectional. Lookup by identifier accepts either
/// the id or the display name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    routes: BTreeMap<RouteId, Route>,
    stops: BTreeMap<StopId, Stop>,
    route_lookup: HashMap<String, RouteId>,
    stop_lookup: HashMap<String, StopId>,
}

impl TransitGraph {
    /// A graph with no routes and no stops. Lookups return `None` and
    /// trips over it are empty.
    pub fn empty() -> Self {
        TransitGraph::default()
    }

    /// Build a graph from fetched records.
    ///
    /// Each entry pairs one route with the stops it serves. Stops shared
    /// between routes are deduplicated by id: the first record seen for an
    /// id supplies the entity, later ones only add membership. A route id
    /// appearing twice likewise keeps the first record's attributes.
    pub fn build(data: Vec<(RouteRecord, Vec<StopRecord>)>) -> Self {
        let mut graph = TransitGraph::empty();

        for (route_record, stop_records) in data {
            let route_id = route_record.id.clone();
            graph
                .routes
                .entry(route_id.clone())
                .or_insert_with(|| Route::from(route_record));

            for stop_record in stop_records {
                let stop_id = stop_record.id.clone();
                let stop = graph
                    .stops
                    .entry(stop_id.clone())
                    .or_insert_with(|| Stop::from(stop_record));
                stop.link(route_id.clone());
                if let Some(route) = graph.routes.get_mut(&route_id) {
                    route.link(stop_id);
                }
            }
        }

        for (id, route) in &graph.routes {
            graph.route_lookup.insert(normalize(id.as_str()), id.clone());
            graph
                .route_lookup
                .insert(normalize(&route.long_name), id.clone());
        }
        for (id, stop) in &graph.stops {
            graph.stop_lookup.insert(normalize(id.as_str()), id.clone());
            graph.stop_lookup.insert(normalize(&stop.name), id.clone());
        }

        graph
    }

    /// All routes, in id order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// All stops, in id order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// Number of routes in the graph.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of stops in the graph.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Whether the graph holds no routes at all.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by id or display name, case-insensitively.
    pub fn route(&self, ident: &str) -> Option<&Route> {
        self.route_lookup
            .get(&normalize(ident))
            .and_then(|id| self.routes.get(id))
    }

    /// Look up a stop by id or display name, case-insensitively.
    pub fn stop(&self, ident: &str) -> Option<&Stop> {
        self.stop_lookup
            .get(&normalize(ident))
            .and_then(|id| self.stops.get(id))
    }

    /// Resolve a route id to its entity.
    pub fn route_by_id(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Resolve a stop id to its entity.
    pub fn stop_by_id(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::source::{RouteRecord, StopRecord};

    fn sample_graph() -> TransitGraph {
        TransitGraph::build(vec![
            (
                RouteRecord::new("Red", "Red Line"),
                vec![
                    StopRecord::new("place-asmnl", "Ashmont"),
                    StopRecord::new("place-pktrm", "Park Street"),
                    StopRecord::new("place-alfcl", "Alewife"),
                ],
            ),
            (
                RouteRecord::new("Green-B", "Green Line B"),
                vec![
                    StopRecord::new("place-pktrm", "Park Street"),
                    StopRecord::new("place-armnl", "Arlington"),
                ],
            ),
        ])
    }

    #[test]
    fn build_links_membership_both_ways() {
        let graph = sample_graph();

        for route in graph.routes() {
            for stop_id in route.stop_ids() {
                let stop = graph.stop_by_id(stop_id).unwrap();
                assert!(
                    stop.is_on(&route.id),
                    "{} not linked back to {}",
                    stop.id,
                    route.id
                );
            }
        }
        for stop in graph.stops() {
            for route_id in stop.route_ids() {
                let route = graph.route_by_id(route_id).unwrap();
                assert!(route.serves(&stop.id));
            }
        }
    }

    #[test]
    fn shared_stops_are_deduplicated() {
        let graph = sample_graph();

        assert_eq!(graph.stop_count(), 4);
        let park = graph.stop("Park Street").unwrap();
        assert_eq!(park.route_count(), 2);
        assert!(park.is_on(&RouteId::new("Red")));
        assert!(park.is_on(&RouteId::new("Green-B")));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let graph = sample_graph();

        // By display name, any casing.
        let red = graph.route("red line").unwrap();
        assert_eq!(red.id, RouteId::new("Red"));
        assert_eq!(graph.route("RED LINE").unwrap().id, red.id);

        // By id, any casing.
        assert_eq!(graph.route("Red").unwrap().id, red.id);
        assert_eq!(graph.route("red").unwrap().id, red.id);

        let ashmont = graph.stop("ashmont").unwrap();
        assert_eq!(ashmont.id, StopId::new("place-asmnl"));
        assert_eq!(graph.stop("PLACE-ASMNL").unwrap().id, ashmont.id);
    }

    #[test]
    fn lookup_trims_whitespace() {
        let graph = sample_graph();
        assert!(graph.stop("  Ashmont ").is_some());
    }

    #[test]
    fn unknown_identifier_is_none_not_error() {
        let graph = sample_graph();
        assert!(graph.route("Purple Line").is_none());
        assert!(graph.stop("Narnia").is_none());
    }

    #[test]
    fn empty_graph() {
        let graph = TransitGraph::empty();
        assert!(graph.is_empty());
        assert_eq!(graph.routes().count(), 0);
        assert_eq!(graph.stops().count(), 0);
        assert!(graph.route("Red").is_none());
        assert!(graph.stop("Ashmont").is_none());
    }

    #[test]
    fn duplicate_route_keeps_first_attributes() {
        let mut first = RouteRecord::new("Red", "Red Line");
        first.color = Some("DA291C".to_string());
        let second = RouteRecord::new("Red", "Some Later Name");

        let graph = TransitGraph::build(vec![
            (first, vec![StopRecord::new("a", "A")]),
            (second, vec![StopRecord::new("b", "B")]),
        ]);

        assert_eq!(graph.route_count(), 1);
        let red = graph.route("Red").unwrap();
        assert_eq!(red.long_name, "Red Line");
        assert_eq!(red.color.as_deref(), Some("DA291C"));
        // Membership from both records is retained.
        assert_eq!(red.stop_count(), 2);
    }
}
