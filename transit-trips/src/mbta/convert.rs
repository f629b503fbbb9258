//! Validation of MBTA DTOs into source records.
//!
//! The records the repository consumes require an id and a display name;
//! everything else is carried through as-is. A resource without its
//! required fields fails the whole fetch with [`FormatError`]: schema
//! drift should be loud, not a silently thinner network.

use crate::domain::RouteType;
use crate::network::source::{FormatError, RouteRecord, StopRecord};

use super::types::{RouteResource, StopResource};

/// Validate one route resource.
pub fn route_record(resource: RouteResource) -> Result<RouteRecord, FormatError> {
    let id = resource
        .id
        .filter(|id| !id.is_empty())
        .ok_or(FormatError::MissingField { field: "id" })?;
    let attributes = resource
        .attributes
        .ok_or(FormatError::MissingField { field: "attributes" })?;
    let long_name = attributes
        .long_name
        .ok_or(FormatError::MissingField { field: "long_name" })?;

    let mut record = RouteRecord::new(id, long_name);
    record.short_name = attributes.short_name.filter(|s| !s.is_empty());
    record.route_type = attributes.route_type.map(RouteType::from_code);
    record.color = attributes.color;
    record.text_color = attributes.text_color;
    record.description = attributes.description;
    record.fare_class = attributes.fare_class;
    record.sort_order = attributes.sort_order;
    record.direction_names = attributes.direction_names.unwrap_or_default();
    record.direction_destinations = attributes.direction_destinations.unwrap_or_default();
    Ok(record)
}

/// Validate one stop resource.
pub fn stop_record(resource: StopResource) -> Result<StopRecord, FormatError> {
    let id = resource
        .id
        .filter(|id| !id.is_empty())
        .ok_or(FormatError::MissingField { field: "id" })?;
    let attributes = resource
        .attributes
        .ok_or(FormatError::MissingField { field: "attributes" })?;
    let name = attributes
        .name
        .ok_or(FormatError::MissingField { field: "name" })?;

    let mut record = StopRecord::new(id, name);
    record.latitude = attributes.latitude;
    record.longitude = attributes.longitude;
    record.municipality = attributes.municipality;
    record.description = attributes.description;
    record.address = attributes.address;
    record.platform_name = attributes.platform_name;
    record.wheelchair_boarding = attributes.wheelchair_boarding;
    Ok(record)
}
