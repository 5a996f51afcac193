//! Facade crate for the maps conveyor.
//!
//! This crate re-exports the core query types and, behind the `http` feature,
//! the HTTP directions source.

#![forbid(unsafe_code)]

pub use conveyor_core::{
    CoordinatePair, DirectionsError, DirectionsRequest, DirectionsSource, FetchMode, LegSummary,
    ParsedRoute, QueryConfigError, RouteQuery, RouteStep,
};

#[cfg(feature = "http")]
pub use conveyor_data::routing::{
    DEFAULT_BASE_URL, HttpDirectionsSource, HttpDirectionsSourceConfig, ProviderBuildError,
};

/// Create a query against the default Directions API endpoint.
///
/// # Errors
///
/// Returns an error if the HTTP client or its runtime fails to build.
#[cfg(feature = "http")]
pub fn directions_query() -> Result<RouteQuery<HttpDirectionsSource>, ProviderBuildError> {
    HttpDirectionsSource::with_config(HttpDirectionsSourceConfig::default()).map(RouteQuery::new)
}
