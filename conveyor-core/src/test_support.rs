//! Test utilities for directions sources.
//!
//! This module provides [`StubDirectionsSource`], a deterministic test double
//! for [`DirectionsSource`] that replays scripted responses without making
//! HTTP requests, and [`configure`], which fills a [`RouteQuery`] with sample
//! coordinates. Both are only compiled for tests or with the `test-support`
//! feature.

use std::cell::{Cell, RefCell};

use crate::{DirectionsError, DirectionsRequest, DirectionsSource, ParsedRoute, RouteQuery};

type Response = Result<ParsedRoute, DirectionsError>;

/// Stub `DirectionsSource` for testing.
///
/// Responses are taken from a script in call order; once the script is
/// exhausted the fallback response is repeated. Individual calls can be made
/// to fail with [`StubDirectionsSource::failing_on_call`].
///
/// # Example
///
/// ```
/// use conveyor_core::{DirectionsError, ParsedRoute, RouteQuery};
/// use conveyor_core::test_support::{StubDirectionsSource, configure};
///
/// let stub = StubDirectionsSource::with_route(ParsedRoute::default())
///     .failing_on_call(1, DirectionsError::ParseError { message: "bad".into() });
/// let mut query = RouteQuery::new(&stub);
/// configure(&mut query);
///
/// assert!(query.fetch_route().is_err());
/// assert!(query.fetch_route().is_ok());
/// assert_eq!(stub.calls(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StubDirectionsSource {
    script: Vec<Response>,
    fallback: Response,
    failures: Vec<(usize, DirectionsError)>,
    calls: Cell<usize>,
    last_request: RefCell<Option<DirectionsRequest>>,
}

impl Default for StubDirectionsSource {
    fn default() -> Self {
        Self::with_route(ParsedRoute::default())
    }
}

impl StubDirectionsSource {
    /// Create a source that returns `route` on every call.
    #[must_use]
    pub const fn with_route(route: ParsedRoute) -> Self {
        Self::with_fallback(Ok(route))
    }

    /// Create a source that fails with `error` on every call.
    #[must_use]
    pub const fn with_error(error: DirectionsError) -> Self {
        Self::with_fallback(Err(error))
    }

    /// Create a source that replays `responses` in order.
    ///
    /// The last response is repeated once the sequence runs out. An empty
    /// sequence behaves like [`StubDirectionsSource::default`].
    #[must_use]
    pub fn with_sequence(responses: Vec<Response>) -> Self {
        let fallback = responses
            .last()
            .cloned()
            .unwrap_or_else(|| Ok(ParsedRoute::default()));
        Self {
            script: responses,
            ..Self::with_fallback(fallback)
        }
    }

    /// Make the `call`-th fetch (counting from one) fail with `error`.
    #[must_use]
    pub fn failing_on_call(mut self, call: usize, error: DirectionsError) -> Self {
        self.failures.push((call, error));
        self
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// The most recent request received, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<DirectionsRequest> {
        self.last_request.borrow().clone()
    }

    const fn with_fallback(fallback: Response) -> Self {
        Self {
            script: Vec::new(),
            fallback,
            failures: Vec::new(),
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }

    fn response_for(&self, call: usize) -> Response {
        if let Some((_, error)) = self.failures.iter().find(|(n, _)| *n == call) {
            return Err(error.clone());
        }
        call.checked_sub(1)
            .and_then(|index| self.script.get(index))
            .unwrap_or(&self.fallback)
            .clone()
    }
}

impl DirectionsSource for StubDirectionsSource {
    fn fetch_directions(&self, request: &DirectionsRequest) -> Result<ParsedRoute, DirectionsError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        *self.last_request.borrow_mut() = Some(request.clone());
        self.response_for(call)
    }
}

/// Fill `query` with a sample key and New York to Washington coordinates.
pub fn configure<S>(query: &mut RouteQuery<S>) -> &mut RouteQuery<S> {
    query
        .set_api_key("test-key")
        .set_origin_latitude("40.7128")
        .set_origin_longitude("-74.0060")
        .set_destination_latitude("38.9072")
        .set_destination_longitude("-77.0369")
}
