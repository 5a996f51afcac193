//! Route query configuration and the place-name containment check.

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::directions::{CoordinatePair, DirectionsError, DirectionsRequest, DirectionsSource};
use crate::ParsedRoute;

/// How many fetches a containment check performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Fetch once and search summaries, legs and steps of that one result.
    #[default]
    Once,
    /// Fetch separately for summaries, legs and steps, in that order.
    ///
    /// Each fetch may observe different upstream data, and a failure in any
    /// of the three makes the whole check report `false`.
    PerSection,
}

/// Errors returned by the [`RouteQuery`] getters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryConfigError {
    /// The field was read before any value was assigned.
    #[error("{field} has not been configured")]
    Unset {
        /// Human-readable field name.
        field: &'static str,
    },
}

/// Directions lookup between two coordinates, backed by a [`DirectionsSource`].
///
/// Setters store their argument verbatim and return `&mut Self` so calls can
/// be chained. Nothing is validated until [`RouteQuery::fetch_route`] runs.
///
/// # Examples
///
/// ```
/// use conveyor_core::{DirectionsError, RouteQuery};
/// use conveyor_core::test_support::StubDirectionsSource;
///
/// let mut query = RouteQuery::new(StubDirectionsSource::default());
/// query.set_origin_latitude("40.7128");
///
/// assert_eq!(query.origin_latitude(), Ok("40.7128"));
/// assert!(query.origin_longitude().is_err());
/// assert_eq!(query.fetch_route(), Err(DirectionsError::MissingOrigin));
/// ```
pub struct RouteQuery<S> {
    source: S,
    api_key: Option<String>,
    origin_latitude: Option<String>,
    origin_longitude: Option<String>,
    destination_latitude: Option<String>,
    destination_longitude: Option<String>,
    fetch_mode: FetchMode,
}

impl<S: fmt::Debug> fmt::Debug for RouteQuery<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteQuery")
            .field("source", &self.source)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("origin_latitude", &self.origin_latitude)
            .field("origin_longitude", &self.origin_longitude)
            .field("destination_latitude", &self.destination_latitude)
            .field("destination_longitude", &self.destination_longitude)
            .field("fetch_mode", &self.fetch_mode)
            .finish()
    }
}

impl<S> RouteQuery<S> {
    /// Create an unconfigured query that fetches through `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            api_key: None,
            origin_latitude: None,
            origin_longitude: None,
            destination_latitude: None,
            destination_longitude: None,
            fetch_mode: FetchMode::Once,
        }
    }

    /// Set the access key sent with each request.
    pub fn set_api_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the origin latitude.
    pub fn set_origin_latitude(&mut self, latitude: impl Into<String>) -> &mut Self {
        self.origin_latitude = Some(latitude.into());
        self
    }

    /// Set the origin longitude.
    pub fn set_origin_longitude(&mut self, longitude: impl Into<String>) -> &mut Self {
        self.origin_longitude = Some(longitude.into());
        self
    }

    /// Set the destination latitude.
    pub fn set_destination_latitude(&mut self, latitude: impl Into<String>) -> &mut Self {
        self.destination_latitude = Some(latitude.into());
        self
    }

    /// Set the destination longitude.
    pub fn set_destination_longitude(&mut self, longitude: impl Into<String>) -> &mut Self {
        self.destination_longitude = Some(longitude.into());
        self
    }

    /// Choose how many fetches [`RouteQuery::check_if_inside`] performs.
    pub const fn set_fetch_mode(&mut self, mode: FetchMode) -> &mut Self {
        self.fetch_mode = mode;
        self
    }

    /// Origin latitude exactly as set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryConfigError::Unset`] if it was never set.
    pub fn origin_latitude(&self) -> Result<&str, QueryConfigError> {
        configured(self.origin_latitude.as_deref(), "origin latitude")
    }

    /// Origin longitude exactly as set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryConfigError::Unset`] if it was never set.
    pub fn origin_longitude(&self) -> Result<&str, QueryConfigError> {
        configured(self.origin_longitude.as_deref(), "origin longitude")
    }

    /// Destination latitude exactly as set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryConfigError::Unset`] if it was never set.
    pub fn destination_latitude(&self) -> Result<&str, QueryConfigError> {
        configured(self.destination_latitude.as_deref(), "destination latitude")
    }

    /// Destination longitude exactly as set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryConfigError::Unset`] if it was never set.
    pub fn destination_longitude(&self) -> Result<&str, QueryConfigError> {
        configured(self.destination_longitude.as_deref(), "destination longitude")
    }

    /// Current fetch mode.
    #[must_use]
    pub const fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    /// The source this query fetches through.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Validate the configuration and snapshot it as a request.
    ///
    /// Checks run in order: origin, destination, access key. Unset and empty
    /// values are both rejected.
    ///
    /// # Errors
    ///
    /// Returns the configuration variant of [`DirectionsError`] for the
    /// first missing part.
    pub fn directions_request(&self) -> Result<DirectionsRequest, DirectionsError> {
        let origin = pair(&self.origin_latitude, &self.origin_longitude)
            .ok_or(DirectionsError::MissingOrigin)?;
        let destination = pair(&self.destination_latitude, &self.destination_longitude)
            .ok_or(DirectionsError::MissingDestination)?;
        let api_key = non_empty(&self.api_key).ok_or(DirectionsError::MissingApiKey)?;
        Ok(DirectionsRequest {
            origin,
            destination,
            api_key: api_key.to_owned(),
        })
    }
}

impl<S: DirectionsSource> RouteQuery<S> {
    /// Fetch the route for the configured coordinates.
    ///
    /// A fresh request is issued on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when validation fails, otherwise
    /// whatever the source reports.
    pub fn fetch_route(&self) -> Result<ParsedRoute, DirectionsError> {
        let request = self.directions_request()?;
        self.source.fetch_directions(&request)
    }

    /// Whether `location` appears in the route's summaries, leg start
    /// addresses or step instructions.
    ///
    /// Matching is a case-insensitive substring search using Unicode case
    /// mapping. Every failure, configuration gaps included, yields `false`,
    /// the same answer as "not found".
    #[must_use]
    pub fn check_if_inside(&self, location: &str) -> bool {
        let needle = location.to_lowercase();
        let outcome = match self.fetch_mode {
            FetchMode::Once => self.search_once(&needle),
            FetchMode::PerSection => self.search_per_section(&needle),
        };
        outcome.unwrap_or_else(|err| {
            warn!("route lookup for {location:?} failed: {err}");
            false
        })
    }

    fn search_once(&self, needle: &str) -> Result<bool, DirectionsError> {
        debug!("fetching route once for containment check");
        Ok(self.fetch_route()?.mentions(needle))
    }

    fn search_per_section(&self, needle: &str) -> Result<bool, DirectionsError> {
        debug!("fetching route per section for containment check");
        let for_summaries = self.fetch_route()?;
        let for_legs = self.fetch_route()?;
        let for_steps = self.fetch_route()?;
        Ok(for_summaries.summaries_mention(needle)
            || for_legs.legs_mention(needle)
            || for_steps.steps_mention(needle))
    }
}

fn configured<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, QueryConfigError> {
    value.ok_or(QueryConfigError::Unset { field })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn pair(latitude: &Option<String>, longitude: &Option<String>) -> Option<CoordinatePair> {
    Some(CoordinatePair::new(non_empty(latitude)?, non_empty(longitude)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::test_support::{StubDirectionsSource, configure};
    use crate::{LegSummary, RouteStep};

    #[fixture]
    fn route() -> ParsedRoute {
        ParsedRoute {
            summaries: vec!["I-95 S".to_owned()],
            legs: vec![LegSummary::new(
                "123 Main St, Springfield",
                "1 Oak Ave",
                "3.1 km",
                "7 mins",
            )],
            steps: vec![RouteStep::new("Turn <b>left</b> onto Elm Street")],
        }
    }

    fn network_error() -> DirectionsError {
        DirectionsError::NetworkError {
            url: "https://maps.example.com/directions".to_owned(),
            message: "connection refused".to_owned(),
        }
    }

    #[rstest]
    fn getters_return_values_verbatim() {
        let mut query = RouteQuery::new(StubDirectionsSource::default());
        query
            .set_origin_latitude(" 40.7128 ")
            .set_origin_longitude("-74.0060")
            .set_destination_latitude("")
            .set_destination_longitude("not-a-number");

        assert_eq!(query.origin_latitude(), Ok(" 40.7128 "));
        assert_eq!(query.origin_longitude(), Ok("-74.0060"));
        assert_eq!(query.destination_latitude(), Ok(""));
        assert_eq!(query.destination_longitude(), Ok("not-a-number"));
    }

    #[rstest]
    fn getters_report_unset_fields() {
        let query = RouteQuery::new(StubDirectionsSource::default());
        assert_eq!(
            query.destination_longitude(),
            Err(QueryConfigError::Unset {
                field: "destination longitude"
            })
        );
    }

    #[rstest]
    #[case::unset_origin_latitude(None, Some("1"), Some("2"), Some("3"), DirectionsError::MissingOrigin)]
    #[case::empty_origin_longitude(Some("1"), Some(""), Some("2"), Some("3"), DirectionsError::MissingOrigin)]
    #[case::unset_destination_longitude(Some("1"), Some("2"), Some("3"), None, DirectionsError::MissingDestination)]
    #[case::empty_destination_latitude(Some("1"), Some("2"), Some(""), Some("3"), DirectionsError::MissingDestination)]
    #[case::origin_checked_first(None, None, None, None, DirectionsError::MissingOrigin)]
    fn validation_rejects_missing_coordinates(
        #[case] origin_lat: Option<&str>,
        #[case] origin_lng: Option<&str>,
        #[case] dest_lat: Option<&str>,
        #[case] dest_lng: Option<&str>,
        #[case] expected: DirectionsError,
        route: ParsedRoute,
    ) {
        let stub = StubDirectionsSource::with_route(route);
        let mut query = RouteQuery::new(&stub);
        query.set_api_key("key");
        if let Some(v) = origin_lat {
            query.set_origin_latitude(v);
        }
        if let Some(v) = origin_lng {
            query.set_origin_longitude(v);
        }
        if let Some(v) = dest_lat {
            query.set_destination_latitude(v);
        }
        if let Some(v) = dest_lng {
            query.set_destination_longitude(v);
        }

        assert_eq!(query.fetch_route(), Err(expected));
        assert_eq!(stub.calls(), 0, "validation must fail before fetching");
        assert!(!query.check_if_inside("i-95"));
    }

    #[rstest]
    fn missing_key_is_reported_after_coordinates(route: ParsedRoute) {
        let mut query = RouteQuery::new(StubDirectionsSource::with_route(route));
        configure(&mut query);
        query.set_api_key("");
        assert_eq!(query.fetch_route(), Err(DirectionsError::MissingApiKey));
    }

    #[rstest]
    fn request_carries_configured_values() {
        let mut query = RouteQuery::new(StubDirectionsSource::default());
        query
            .set_api_key("k")
            .set_origin_latitude("1")
            .set_origin_longitude("2")
            .set_destination_latitude("3")
            .set_destination_longitude("4");

        let request = query.directions_request().expect("request should build");
        assert_eq!(request.origin, CoordinatePair::new("1", "2"));
        assert_eq!(request.destination, CoordinatePair::new("3", "4"));
        assert_eq!(request.api_key, "k");
    }

    #[rstest]
    #[case::zero_is_a_coordinate("0", "0")]
    #[case::zero_origin_on_the_equator("0", "-74.0060")]
    fn zero_coordinates_are_accepted(#[case] latitude: &str, #[case] longitude: &str) {
        let stub = StubDirectionsSource::default();
        let mut query = RouteQuery::new(&stub);
        configure(&mut query)
            .set_origin_latitude(latitude)
            .set_origin_longitude(longitude);

        let request = query.directions_request().expect("zero is a valid coordinate");
        assert_eq!(request.origin, CoordinatePair::new(latitude, longitude));
        assert!(query.fetch_route().is_ok());
        assert_eq!(stub.calls(), 1);
    }

    #[rstest]
    #[case("I-95 S")]
    #[case("i-95 s")]
    #[case("MAIN ST")]
    #[case("elm street")]
    fn finds_locations_in_any_section(route: ParsedRoute, #[case] location: &str) {
        let mut query = RouteQuery::new(StubDirectionsSource::with_route(route));
        configure(&mut query);
        assert!(query.check_if_inside(location));
    }

    #[rstest]
    fn end_address_is_not_searched(route: ParsedRoute) {
        let mut query = RouteQuery::new(StubDirectionsSource::with_route(route));
        configure(&mut query);
        assert!(!query.check_if_inside("oak"));
    }

    #[rstest]
    fn once_mode_fetches_a_single_time(route: ParsedRoute) {
        let stub = StubDirectionsSource::with_route(route);
        let mut query = RouteQuery::new(&stub);
        configure(&mut query);

        assert!(!query.check_if_inside("nowhere"));
        assert_eq!(stub.calls(), 1);
    }

    #[rstest]
    fn per_section_mode_fetches_three_times(route: ParsedRoute) {
        let stub = StubDirectionsSource::with_route(route);
        let mut query = RouteQuery::new(&stub);
        configure(&mut query).set_fetch_mode(FetchMode::PerSection);

        assert!(query.check_if_inside("elm street"));
        assert_eq!(stub.calls(), 3);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn per_section_failure_hides_matches(route: ParsedRoute, #[case] failing_call: usize) {
        let stub = StubDirectionsSource::with_route(route).failing_on_call(failing_call, network_error());
        let mut query = RouteQuery::new(&stub);
        configure(&mut query).set_fetch_mode(FetchMode::PerSection);

        assert!(!query.check_if_inside("i-95 s"));
        assert_eq!(stub.calls(), failing_call);
    }

    #[rstest]
    fn per_section_reads_each_section_from_its_own_fetch() {
        let summaries_only = ParsedRoute {
            summaries: vec!["A1".to_owned()],
            ..ParsedRoute::default()
        };
        let stub = StubDirectionsSource::with_sequence(vec![
            Ok(ParsedRoute::default()),
            Ok(summaries_only.clone()),
            Ok(summaries_only),
        ]);
        let mut query = RouteQuery::new(&stub);
        configure(&mut query).set_fetch_mode(FetchMode::PerSection);

        assert!(!query.check_if_inside("a1"));
    }

    #[rstest]
    fn transport_failure_reads_as_not_found(route: ParsedRoute) {
        let stub = StubDirectionsSource::with_route(route).failing_on_call(1, network_error());
        let mut query = RouteQuery::new(&stub);
        configure(&mut query);

        assert!(!query.check_if_inside("i-95 s"));
        assert!(query.check_if_inside("i-95 s"), "only the first call fails");
    }

    #[rstest]
    fn debug_output_hides_the_key() {
        let mut query = RouteQuery::new(StubDirectionsSource::default());
        query.set_api_key("very-secret");
        let rendered = format!("{query:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
