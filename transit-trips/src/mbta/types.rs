//! MBTA V3 API response DTOs.
//!
//! The API speaks JSON:API: resources arrive under a `data` array, each
//! with an `id` and an `attributes` object. Fields are `Option`-heavy
//! because the API omits attributes it has no value for; validation into
//! required-field records happens in [`convert`](super::convert), not
//! here.

use serde::Deserialize;

/// JSON:API envelope: a collection of resources under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: Vec<T>,
}

/// One resource from `GET /routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: Option<String>,
    pub attributes: Option<RouteAttributes>,
}

/// Attributes of a route resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteAttributes {
    /// Full display name, e.g. "Red Line".
    pub long_name: Option<String>,
    /// Abbreviated name; empty string for rapid-transit lines.
    pub short_name: Option<String>,
    /// Numeric GTFS route-type code.
    #[serde(rename = "type")]
    pub route_type: Option<u16>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    /// e.g. "Rapid Transit".
    pub description: Option<String>,
    pub fare_class: Option<String>,
    pub sort_order: Option<i64>,
    pub direction_names: Option<Vec<String>>,
    pub direction_destinations: Option<Vec<String>>,
}

/// One resource from `GET /stops`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    pub id: Option<String>,
    pub attributes: Option<StopAttributes>,
}

/// Attributes of a stop resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// Display name, e.g. "Ashmont".
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub municipality: Option<String>,
    /// Usually "{name} - {line}", e.g. "Alewife - Red Line".
    pub description: Option<String>,
    pub address: Option<String>,
    pub platform_name: Option<String>,
    /// GTFS wheelchair boarding code.
    pub wheelchair_boarding: Option<i64>,
}
