//! Directions source trait and the validated request it consumes.

use std::fmt;

use crate::ParsedRoute;

use super::error::DirectionsError;

/// Latitude and longitude as supplied by the caller.
///
/// Values are kept verbatim; they are never parsed or range-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatePair {
    /// Latitude text.
    pub latitude: String,
    /// Longitude text.
    pub longitude: String,
}

impl CoordinatePair {
    /// Pair a latitude with a longitude.
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Format as the `lat,lng` value used in query strings.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A fully configured directions lookup.
///
/// Only [`RouteQuery`](crate::RouteQuery) builds these in normal use, after
/// checking that every field is present and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectionsRequest {
    /// Where the route starts.
    pub origin: CoordinatePair,
    /// Where the route ends.
    pub destination: CoordinatePair,
    /// Access key sent with the request.
    pub api_key: String,
}

impl fmt::Debug for DirectionsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsRequest")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Fetch and flatten the route for a [`DirectionsRequest`].
///
/// # Examples
///
/// ```rust
/// use conveyor_core::{
///     DirectionsError, DirectionsRequest, DirectionsSource, ParsedRoute,
/// };
///
/// struct FixedSummary;
///
/// impl DirectionsSource for FixedSummary {
///     fn fetch_directions(
///         &self,
///         _request: &DirectionsRequest,
///     ) -> Result<ParsedRoute, DirectionsError> {
///         Ok(ParsedRoute {
///             summaries: vec!["A1".to_owned()],
///             ..ParsedRoute::default()
///         })
///     }
/// }
///
/// let request = DirectionsRequest {
///     origin: conveyor_core::CoordinatePair::new("51.5", "-0.1"),
///     destination: conveyor_core::CoordinatePair::new("55.9", "-3.2"),
///     api_key: "secret".to_owned(),
/// };
/// let route = FixedSummary.fetch_directions(&request)?;
/// assert_eq!(route.summaries, ["A1"]);
/// # Ok::<(), DirectionsError>(())
/// ```
pub trait DirectionsSource {
    /// Return the flattened route for `request`.
    fn fetch_directions(&self, request: &DirectionsRequest) -> Result<ParsedRoute, DirectionsError>;
}

impl<T: DirectionsSource + ?Sized> DirectionsSource for &T {
    fn fetch_directions(&self, request: &DirectionsRequest) -> Result<ParsedRoute, DirectionsError> {
        (**self).fetch_directions(request)
    }
}

impl<T: DirectionsSource + ?Sized> DirectionsSource for Box<T> {
    fn fetch_directions(&self, request: &DirectionsRequest) -> Result<ParsedRoute, DirectionsError> {
        (**self).fetch_directions(request)
    }
}
