//! HTTP-based directions sources.
//!
//! This module provides [`HttpDirectionsSource`], an implementation of
//! [`conveyor_core::DirectionsSource`] that fetches routes from a
//! Google-style Directions JSON API.
//!
//! # Architecture
//!
//! Each fetch issues one `GET {endpoint}?destination=..&origin=..&key=..`,
//! decodes the JSON body and flattens routes, legs and steps into a
//! [`conveyor_core::ParsedRoute`]. The synchronous [`DirectionsSource`] trait
//! is implemented by blocking on async HTTP calls internally, keeping the core
//! library embeddable in synchronous contexts.
//!
//! [`DirectionsSource`]: conveyor_core::DirectionsSource
//!
//! # Example
//!
//! ```no_run
//! use conveyor_core::RouteQuery;
//! use conveyor_data::routing::{HttpDirectionsSource, HttpDirectionsSourceConfig};
//! use std::time::Duration;
//!
//! let config = HttpDirectionsSourceConfig::default()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let source = HttpDirectionsSource::with_config(config)?;
//!
//! let mut query = RouteQuery::new(source);
//! query
//!     .set_api_key("your-key")
//!     .set_origin_latitude("40.7128")
//!     .set_origin_longitude("-74.0060")
//!     .set_destination_latitude("38.9072")
//!     .set_destination_longitude("-77.0369");
//!
//! let uses_interstate = query.check_if_inside("I-95");
//! # let _ = uses_interstate;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod google;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDirectionsSource, HttpDirectionsSourceConfig,
    ProviderBuildError,
};
