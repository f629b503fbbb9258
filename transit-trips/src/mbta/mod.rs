//! MBTA V3 API adapter.
//!
//! Implements [`RouteSource`](crate::network::RouteSource) against
//! `https://api-v3.mbta.com`: JSON:API DTOs, validation into source
//! records, and an HTTP client that backs off and retries when the API
//! rate-limits.

mod client;
mod convert;
mod types;

pub use client::{MbtaClient, MbtaConfig};
