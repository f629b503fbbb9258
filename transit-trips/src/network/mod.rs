//! Network repository: owns the route/stop graph for one transit system.
//!
//! [`TransitNetwork`] pairs a [`RouteSource`] with a lazily-built
//! [`TransitGraph`]. The first accessor call fetches everything the source
//! has for the configured route types and commits the graph all-or-nothing;
//! after that, every call reads the same immutable graph. A failed
//! population commits nothing, so the next access starts over.

mod graph;
pub mod source;

use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{Route, RouteType, Stop};
use crate::planner::find_trip;

pub use graph::TransitGraph;
pub use source::{
    FetchStage, FormatError, RouteRecord, RouteSource, SourceError, StopRecord, TransportError,
};

/// How many per-route stop fetches are in flight at once during
/// population.
const STOP_FETCH_BATCH: usize = 5;

/// Repository of routes and stops, populated on first access.
///
/// All accessors take `&mut self` because the first of them to run
/// performs the population; this also makes "single caller drives
/// population" a compile-time fact. Reads after a successful population
/// never touch the source again for the lifetime of this value.
pub struct TransitNetwork<S> {
    source: S,
    route_types: Vec<RouteType>,
    graph: Option<TransitGraph>,
}

impl<S: RouteSource> TransitNetwork<S> {
    /// Create an unpopulated repository over the given source.
    ///
    /// `route_types` is passed through to the source as its fetch filter;
    /// empty means every route the source knows.
    pub fn new(source: S, route_types: Vec<RouteType>) -> Self {
        TransitNetwork {
            source,
            route_types,
            graph: None,
        }
    }

    /// The underlying graph, populating it first if this repository has
    /// never successfully populated.
    pub async fn graph(&mut self) -> Result<&TransitGraph, SourceError> {
        let graph = match self.graph.take() {
            Some(graph) => graph,
            None => populate(&self.source, &self.route_types).await?,
        };
        Ok(self.graph.insert(graph))
    }

    /// All known routes, in id order.
    pub async fn routes(&mut self) -> Result<Vec<&Route>, SourceError> {
        Ok(self.graph().await?.routes().collect())
    }

    /// All known stops, in id order.
    pub async fn stops(&mut self) -> Result<Vec<&Stop>, SourceError> {
        Ok(self.graph().await?.stops().collect())
    }

    /// Look up one route by id or display name, case-insensitively.
    /// Unknown identifiers are `None`, not an error.
    pub async fn route(&mut self, ident: &str) -> Result<Option<&Route>, SourceError> {
        Ok(self.graph().await?.route(ident))
    }

    /// Look up one stop by id or display name, case-insensitively.
    pub async fn stop(&mut self, ident: &str) -> Result<Option<&Stop>, SourceError> {
        Ok(self.graph().await?.stop(ident))
    }

    /// Find a sequence of routes connecting two stops, identified by id or
    /// display name.
    ///
    /// Returns an empty sequence when either identifier is unknown or no
    /// connection exists. See [`find_trip`] for the search semantics.
    pub async fn trip(&mut self, origin: &str, destination: &str) -> Result<Vec<&Route>, SourceError> {
        let graph = self.graph().await?;
        let (Some(origin), Some(destination)) = (graph.stop(origin), graph.stop(destination))
        else {
            return Ok(Vec::new());
        };
        Ok(find_trip(graph, origin, destination))
    }
}

/// Fetch everything and build the graph.
///
/// The route listing comes first; stop fetches then run in bounded
/// parallel batches, one request per route. Any failure abandons the
/// whole cycle; partial results are never committed.
async fn populate<S: RouteSource>(
    source: &S,
    route_types: &[RouteType],
) -> Result<TransitGraph, SourceError> {
    info!(types = ?route_types.iter().map(|t| t.code()).collect::<Vec<_>>(), "populating transit network");

    let route_records = source.fetch_routes(route_types).await?;
    debug!(routes = route_records.len(), "fetched route listing");

    let mut data = Vec::with_capacity(route_records.len());
    for batch in route_records.chunks(STOP_FETCH_BATCH) {
        let fetches = batch.iter().map(|record| async move {
            let stops = source.fetch_stops(&record.id).await?;
            Ok::<_, SourceError>((record.clone(), stops))
        });
        for result in join_all(fetches).await {
            let (record, stops) = result?;
            debug!(route = %record.id, stops = stops.len(), "fetched stops for route");
            data.push((record, stops));
        }
    }

    let graph = TransitGraph::build(data);
    info!(
        routes = graph.route_count(),
        stops = graph.stop_count(),
        "population complete"
    );
    Ok(graph)
}
