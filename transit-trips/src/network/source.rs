//! Data source abstraction and error types.
//!
//! A [`RouteSource`] hands the repository validated route and stop records;
//! where they come from (a live API, canned fixtures, an in-memory test
//! double) is the implementor's business. Raw wire formats never cross this
//! boundary: adapters parse and validate before returning, failing with
//! [`FormatError`] when the payload shape does not match expectations.

use std::fmt;
use std::future::Future;

use crate::domain::{RouteId, RouteType, StopId};

/// A validated route record from a data source.
///
/// Carries the identifier, display name, and whatever descriptive
/// attributes the source publishes. Everything past id and long name is
/// optional.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub id: RouteId,
    pub long_name: String,
    pub short_name: Option<String>,
    pub route_type: Option<RouteType>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub description: Option<String>,
    pub fare_class: Option<String>,
    pub sort_order: Option<i64>,
    pub direction_names: Vec<String>,
    pub direction_destinations: Vec<String>,
}

impl RouteRecord {
    /// A record with the given id and long name and every optional
    /// attribute empty.
    pub fn new(id: impl Into<RouteId>, long_name: impl Into<String>) -> Self {
        RouteRecord {
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
        }
    }
}

/// A validated stop record from a data source.
#[derive(Debug, Clone)]
pub struct StopRecord {
    pub id: StopId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub municipality: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub platform_name: Option<String>,
    pub wheelchair_boarding: Option<i64>,
}

impl StopRecord {
    /// A record with the given id and name and every optional attribute
    /// empty.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>) -> Self {
        StopRecord {
            id: id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            municipality: None,
            description: None,
            address: None,
            platform_name: None,
            wheelchair_boarding: None,
        }
    }
}

/// Which population request failed.
///
/// Reported alongside every [`SourceError`] so a caller can tell whether
/// the route listing or a per-route stop fetch went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// The route listing request.
    Routes,
    /// A per-route stop listing request.
    Stops,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Routes => f.write_str("routes"),
            FetchStage::Stops => f.write_str("stops"),
        }
    }
}

/// Network-level failure that survived the source's retry policy.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed: connection refused, DNS, timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited past the retry budget.
    #[error("rate limited: gave up after {attempts} attempts")]
    RateLimited { attempts: u32 },
}

/// The fetched payload did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The body was not parseable as the expected JSON document.
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A required field was absent from an otherwise well-formed payload.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
}

/// Error raised while populating the network.
///
/// The two variants are deliberately distinct kinds: `Transport` means the
/// service could not be reached (or refused to answer), `Format` means it
/// answered with a payload whose shape has drifted from this crate's
/// expectations. Lookups and trip searches over an already-populated
/// network never raise either.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("fetching {stage}: {source}")]
    Transport {
        stage: FetchStage,
        #[source]
        source: TransportError,
    },

    #[error("malformed {stage} payload: {source}")]
    Format {
        stage: FetchStage,
        #[source]
        source: FormatError,
    },
}

impl SourceError {
    /// Wrap a transport failure with its fetch stage.
    pub fn transport(stage: FetchStage, source: impl Into<TransportError>) -> Self {
        SourceError::Transport {
            stage,
            source: source.into(),
        }
    }

    /// Wrap a payload-shape failure with its fetch stage.
    pub fn format(stage: FetchStage, source: FormatError) -> Self {
        SourceError::Format {
            stage,
            source,
        }
    }

    /// Whether this is a connectivity failure rather than schema drift.
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Transport { .. })
    }

    /// Whether this is schema drift rather than a connectivity failure.
    pub fn is_format(&self) -> bool {
        matches!(self, SourceError::Format { .. })
    }

    /// The fetch stage this error arose in.
    pub fn stage(&self) -> FetchStage {
        match self {
            SourceError::Transport { stage, .. } | SourceError::Format { stage, .. } => *stage,
        }
    }
}

/// Provider of raw transit data.
///
/// This abstraction lets the repository and planner be tested against
/// in-memory fixtures instead of a live API.
pub trait RouteSource {
    /// Fetch every route matching the given type filter.
    ///
    /// An empty filter means "all routes". Implementations retry transient
    /// conditions themselves; an error returned here is final.
    fn fetch_routes(
        &self,
        types: &[RouteType],
    ) -> impl Future<Output = Result<Vec<RouteRecord>, SourceError>>;

    /// Fetch every stop served by the given route.
    fn fetch_stops(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<Vec<StopRecord>, SourceError>>;
}
