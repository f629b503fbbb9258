//! Route entity.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{RouteId, RouteType, StopId};

/// A named transit line serving a set of stops.
///
/// Two routes are equal iff their ids are equal; the descriptive
/// attributes do not participate in equality or hashing. Membership is
/// recorded as a set of stop ids rather than owned `Stop` values: the
/// repository arena owns the entities and this set indexes into it.
/// The set is sorted so iteration over a route's stops is deterministic.
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique identifier within the transit system (e.g. "Red").
    pub id: RouteId,
    /// Full display name (e.g. "Red Line").
    pub long_name: String,
    /// Abbreviated name, where the agency provides one.
    pub short_name: Option<String>,
    /// GTFS mode classification.
    pub route_type: Option<RouteType>,
    /// Line colour as a hex string (e.g. "DA291C").
    pub color: Option<String>,
    /// Text colour to use over `color`.
    pub text_color: Option<String>,
    /// Human-readable description (e.g. "Rapid Transit").
    pub description: Option<String>,
    /// Fare class name (e.g. "Rapid Transit", "Free").
    pub fare_class: Option<String>,
    /// Agency-defined ordering hint for presentation.
    pub sort_order: Option<i64>,
    /// Names of the two directions of travel (e.g. "South", "North").
    pub direction_names: Vec<String>,
    /// Terminal destinations for each direction.
    pub direction_destinations: Vec<String>,
    pub(crate) stops: BTreeSet<StopId>,
}

impl Route {
    /// Create a route with the given id and long name and no stops.
    ///
    /// Stops are linked by the repository while the network is being
    /// populated.
    pub fn new(id: impl Into<RouteId>, long_name: impl Into<String>) -> Self {
        Route {
            id: id.into(),
            long_name: long_name.into(),
            short_name: None,
            route_type: None,
            color: None,
            text_color: None,
            description: None,
            fare_class: None,
            sort_order: None,
            direction_names: Vec::new(),
            direction_destinations: Vec::new(),
            stops: BTreeSet::new(),
        }
    }

    /// Ids of the stops this route serves, in id order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &StopId> {
        self.stops.iter()
    }

    /// Whether this route serves the given stop.
    pub fn serves(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }

    /// Number of stops this route serves.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// The name to show for this route: the long name, or the id when the
    /// agency left the long name empty.
    pub fn name(&self) -> &str {
        if self.long_name.is_empty() {
            self.id.as_str()
        } else {
            &self.long_name
        }
    }

    pub(crate) fn link(&mut self, stop: StopId) {
        self.stops.insert(stop);
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id_only() {
        let mut a = Route::new("Red", "Red Line");
        let b = Route::new("Red", "Some Other Name");
        a.color = Some("DA291C".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Route::new("Orange", "Red Line"));
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Route::new("Red", "Red Line"));
        assert!(set.contains(&Route::new("Red", "")));
        assert!(!set.contains(&Route::new("Blue", "Red Line")));
    }

    #[test]
    fn membership() {
        let mut route = Route::new("Red", "Red Line");
        route.link(StopId::new("place-asmnl"));
        route.link(StopId::new("place-alfcl"));
        route.link(StopId::new("place-asmnl"));

        assert_eq!(route.stop_count(), 2);
        assert!(route.serves(&StopId::new("place-alfcl")));
        assert!(!route.serves(&StopId::new("place-pktrm")));

        // Sorted iteration.
        let ids: Vec<&str> = route.stop_ids().map(|s| s.as_str()).collect();
        assert_eq!(ids, ["place-alfcl", "place-asmnl"]);
    }

    #[test]
    fn display_prefers_long_name() {
        let route = Route::new("Red", "Red Line");
        assert_eq!(route.to_string(), "Red Line");

        let unnamed = Route::new("746", "");
        assert_eq!(unnamed.to_string(), "746");
    }
}
