//! GTFS route-type classification.

use std::fmt;

/// Mode of transit a route operates, per the GTFS `route_type` codes.
///
/// The planner never branches on this; it exists only as a filter value
/// passed to the data source when selecting which routes to load.
/// Codes outside the published enumeration are preserved as `Other`
/// rather than rejected, since feeds in the wild use extended values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// Tram, streetcar, or other light rail within a metropolitan area.
    LightRail,
    /// Subway or metro: underground rail within a metropolitan area.
    Subway,
    /// Intercity or long-distance rail.
    Rail,
    /// Short- and long-distance bus routes.
    Bus,
    /// Short- and long-distance boat service.
    Ferry,
    /// Street-level rail car drawn by a cable running beneath the vehicle.
    CableTram,
    /// Suspended cable transport: gondola lift, aerial tramway.
    AerialLift,
    /// Rail system designed for steep inclines.
    Funicular,
    /// Electric bus drawing power from overhead wires.
    Trolleybus,
    /// Railway with a single-rail or beam track.
    Monorail,
    /// Any code outside the published enumeration.
    Other(u16),
}

impl RouteType {
    /// The numeric GTFS code for this route type.
    pub fn code(self) -> u16 {
        match self {
            RouteType::LightRail => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::CableTram => 5,
            RouteType::AerialLift => 6,
            RouteType::Funicular => 7,
            RouteType::Trolleybus => 11,
            RouteType::Monorail => 12,
            RouteType::Other(code) => code,
        }
    }

    /// Map a numeric GTFS code to a route type.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => RouteType::LightRail,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableTram,
            6 => RouteType::AerialLift,
            7 => RouteType::Funicular,
            11 => RouteType::Trolleybus,
            12 => RouteType::Monorail,
            other => RouteType::Other(other),
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteType::LightRail => f.write_str("light rail"),
            RouteType::Subway => f.write_str("subway"),
            RouteType::Rail => f.write_str("rail"),
            RouteType::Bus => f.write_str("bus"),
            RouteType::Ferry => f.write_str("ferry"),
            RouteType::CableTram => f.write_str("cable tram"),
            RouteType::AerialLift => f.write_str("aerial lift"),
            RouteType::Funicular => f.write_str("funicular"),
            RouteType::Trolleybus => f.write_str("trolleybus"),
            RouteType::Monorail => f.write_str("monorail"),
            RouteType::Other(code) => write!(f, "other ({code})"),
        }
    }
}
