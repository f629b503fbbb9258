//! Transit network trip planner.
//!
//! Models a public transit system as a bipartite graph of routes and
//! stops, populated from the MBTA V3 API, and answers reachability
//! queries: which sequence of routes connects two stops?

pub mod domain;
pub mod mbta;
pub mod network;
pub mod planner;
