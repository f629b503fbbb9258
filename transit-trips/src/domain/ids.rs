//! Typed identifiers for routes and stops.
//!
//! Transit agencies use free-form string ids ("Red", "place-asmnl"), so
//! these are thin wrappers over `String`. Wrapping them keeps route and
//! stop ids from being confused at API boundaries.

use std::fmt;

/// Identifier of a route, unique within one transit system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        RouteId(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        RouteId(id)
    }
}

/// Identifier of a stop, unique within one transit system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        StopId(id.to_string())
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        StopId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        assert_eq!(RouteId::new("Red").to_string(), "Red");
        assert_eq!(StopId::new("place-asmnl").to_string(), "place-asmnl");
    }

    #[test]
    fn equality_and_ordering() {
        assert_eq!(RouteId::new("Red"), RouteId::from("Red"));
        assert_ne!(RouteId::new("Red"), RouteId::new("red"));
        assert!(RouteId::new("Green-B") < RouteId::new("Red"));
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StopId::new("place-pktrm"));
        assert!(set.contains(&StopId::from("place-pktrm")));
        assert!(!set.contains(&StopId::from("place-alfcl")));
    }
}
