//! Trip finding over the route/stop graph.
//!
//! Answers: starting at this stop, which sequence of routes reaches that
//! stop? "Shortest" here means fewest route segments (transfers), not
//! stop count or distance.
//!
//! The search reuses nothing across branches: only the current path
//! prevents a route from repeating, so the worst case is exponential in
//! the number of routes. Real transit networks are small in route-space
//! (tens of routes, short diameters), which keeps this comfortably cheap
//! in practice.

mod search;

pub use search::find_trip;
