//! Core domain types for the maps conveyor.
//!
//! A [`RouteQuery`] collects an origin, a destination and an access key, asks a
//! [`DirectionsSource`] for the route between them and answers whether a place
//! name appears anywhere in the route's textual description.
//!
//! Nothing here performs I/O directly. Transports live behind the
//! [`DirectionsSource`] trait so that the query logic can be exercised against
//! scripted responses.
//!
//! # Examples
//!
//! ```
//! use conveyor_core::{LegSummary, ParsedRoute, RouteQuery, RouteStep};
//! use conveyor_core::test_support::StubDirectionsSource;
//!
//! let route = ParsedRoute {
//!     summaries: vec!["I-95 S".to_owned()],
//!     legs: vec![LegSummary::new("123 Main St", "1 Oak Ave", "4.2 mi", "9 mins")],
//!     steps: vec![RouteStep::new("Turn <b>left</b> onto Elm Street")],
//! };
//!
//! let mut query = RouteQuery::new(StubDirectionsSource::with_route(route));
//! query
//!     .set_api_key("secret")
//!     .set_origin_latitude("40.7128")
//!     .set_origin_longitude("-74.0060")
//!     .set_destination_latitude("38.9072")
//!     .set_destination_longitude("-77.0369");
//!
//! assert!(query.check_if_inside("i-95 s"));
//! assert!(!query.check_if_inside("oak ave"));
//! ```

#![forbid(unsafe_code)]

pub mod directions;
mod query;
mod route;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use directions::{CoordinatePair, DirectionsError, DirectionsRequest, DirectionsSource};
pub use query::{FetchMode, QueryConfigError, RouteQuery};
pub use route::{LegSummary, ParsedRoute, RouteStep};
