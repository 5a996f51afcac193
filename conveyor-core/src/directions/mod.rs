//! Fetch route directions between two coordinates.
//!
//! The [`DirectionsSource`] trait abstracts the retrieval of a
//! [`ParsedRoute`](crate::ParsedRoute) for a validated [`DirectionsRequest`].
//! Callers normally reach it through [`RouteQuery`](crate::RouteQuery), which
//! performs the validation and builds the request.
//!
//! Errors cover configuration gaps, transport failures, malformed responses
//! and service-reported failures. See [`DirectionsError`].

mod error;
mod source;

pub use error::DirectionsError;
pub use source::{CoordinatePair, DirectionsRequest, DirectionsSource};
