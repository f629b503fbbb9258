//! Domain types for the transit network.
//!
//! This module contains the entity model: routes, stops, their typed
//! identifiers, and the route-type classification. Entities are built once
//! during network population and are read-only afterwards; code that
//! receives them can rely on the membership sets being mutually consistent.

mod ids;
mod route;
mod route_type;
mod stop;

pub use ids::{RouteId, StopId};
pub use route::Route;
pub use route_type::RouteType;
pub use stop::Stop;
