//! Stop entity.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{RouteId, StopId};

/// A physical location served by one or more routes.
///
/// Equality and hashing consider the id only, mirroring [`Route`]. The
/// routes serving this stop are recorded as a sorted set of route ids;
/// the repository arena resolves them back to entities.
///
/// [`Route`]: super::Route
#[derive(Debug, Clone)]
pub struct Stop {
    /// Unique identifier within the transit system (e.g. "place-asmnl").
    pub id: StopId,
    /// Display name (e.g. "Ashmont").
    pub name: String,
    /// Latitude in degrees, where known.
    pub latitude: Option<f64>,
    /// Longitude in degrees, where known.
    pub longitude: Option<f64>,
    /// Municipality the stop is in (e.g. "Boston").
    pub municipality: Option<String>,
    /// Human-readable description, often "{name} - {line}".
    pub description: Option<String>,
    /// Street address, where the agency publishes one.
    pub address: Option<String>,
    /// Platform name (e.g. "Red Line").
    pub platform_name: Option<String>,
    /// GTFS wheelchair boarding code: 0 unknown, 1 accessible, 2 not.
    pub wheelchair_boarding: Option<i64>,
    pub(crate) routes: BTreeSet<RouteId>,
}

impl Stop {
    /// Create a stop with the given id and name and no routes.
    ///
    /// Routes are linked by the repository while the network is being
    /// populated.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>) -> Self {
        Stop {
            id: id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            municipality: None,
            description: None,
            address: None,
            platform_name: None,
            wheelchair_boarding: None,
            routes: BTreeSet::new(),
        }
    }

    /// Ids of the routes serving this stop, in id order.
    pub fn route_ids(&self) -> impl Iterator<Item = &RouteId> {
        self.routes.iter()
    }

    /// Whether the given route serves this stop.
    pub fn is_on(&self, route: &RouteId) -> bool {
        self.routes.contains(route)
    }

    /// Number of routes serving this stop. Stops with two or more are
    /// transfer points.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub(crate) fn link(&mut self, route: RouteId) {
        self.routes.insert(route);
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
