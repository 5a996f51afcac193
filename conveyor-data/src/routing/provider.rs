//! HTTP-based `DirectionsSource` for the Directions JSON API.
//!
//! This module provides [`HttpDirectionsSource`], an implementation of the
//! [`DirectionsSource`] trait that fetches routes from a directions service
//! via HTTP.
//!
//! # Architecture
//!
//! The [`DirectionsSource`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This source bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use conveyor_core::{CoordinatePair, DirectionsRequest, DirectionsSource};
//! use conveyor_data::routing::HttpDirectionsSource;
//!
//! let source = HttpDirectionsSource::new("https://maps.googleapis.com/maps/api/directions/json")?;
//! let request = DirectionsRequest {
//!     origin: CoordinatePair::new("40.7128", "-74.0060"),
//!     destination: CoordinatePair::new("38.9072", "-77.0369"),
//!     api_key: "your-key".to_owned(),
//! };
//!
//! let route = source.fetch_directions(&request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use conveyor_core::{DirectionsError, DirectionsRequest, DirectionsSource, ParsedRoute};
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::google::{DirectionsResponse, flatten};

/// Error type for [`HttpDirectionsSource`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default Directions API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "maps-conveyor/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder substituted for the access key in logs and errors.
const REDACTED: &str = "REDACTED";

/// Configuration for [`HttpDirectionsSource`].
#[derive(Debug, Clone)]
pub struct HttpDirectionsSourceConfig {
    /// Directions endpoint, query parameters are appended to it.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpDirectionsSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsSourceConfig {
    /// Create a new configuration with the given endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based directions source.
///
/// This source implements the synchronous [`DirectionsSource`] trait by
/// internally blocking on asynchronous HTTP requests. It owns a Tokio runtime
/// that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the stored runtime is used. Inside a
/// multi-threaded runtime the ambient handle is used with
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime the
/// stored runtime is used, which blocks the caller's runtime for the duration
/// of the request.
pub struct HttpDirectionsSource {
    client: Client,
    config: HttpDirectionsSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpDirectionsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDirectionsSource {
    /// Create a new source for `base_url` with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsSourceConfig::new(base_url))
    }

    /// Create a new source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDirectionsSourceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsSourceConfig {
        &self.config
    }

    /// Build the request URL for `request`.
    ///
    /// Parameters are appended as `destination`, `origin`, `key`, in that
    /// order, each `lat,lng` pair form-encoded.
    fn build_url(&self, request: &DirectionsRequest) -> Result<Url, DirectionsError> {
        let destination = request.destination.to_query_value();
        let origin = request.origin.to_query_value();
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("destination", destination.as_str()),
                ("origin", origin.as_str()),
                ("key", request.api_key.as_str()),
            ],
        )
        .map_err(|err| DirectionsError::InvalidUrl {
            url: self.config.base_url.clone(),
            message: err.to_string(),
        })
    }

    /// Fetch and flatten the route asynchronously.
    async fn fetch_async(&self, url: Url) -> Result<ParsedRoute, DirectionsError> {
        let shown = redacted(&url);
        debug!("requesting directions from {shown}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &shown))?;

        let directions: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        convert_response(directions)
    }

    /// Convert a reqwest error to a `DirectionsError`.
    ///
    /// The URL reqwest attaches to its errors still carries the key, so it is
    /// stripped before the message is kept.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout: self.config.timeout,
            };
        }

        if let Some(status) = error.status() {
            return DirectionsError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.without_url().to_string(),
            };
        }

        DirectionsError::NetworkError {
            url: url.to_owned(),
            message: error.without_url().to_string(),
        }
    }
}

/// Convert a decoded response to a [`ParsedRoute`].
fn convert_response(response: DirectionsResponse) -> Result<ParsedRoute, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::ServiceError {
            status: response.status.unwrap_or_default(),
            message: response.error_message.unwrap_or_default(),
        });
    }

    let zero_results = response.status.as_deref() == Some("ZERO_RESULTS");
    let routes = match response.routes {
        Some(routes) => routes,
        None if zero_results => Vec::new(),
        None => {
            return Err(DirectionsError::ParseError {
                message: "directions response missing routes array".to_owned(),
            });
        }
    };

    Ok(flatten(routes))
}

/// Render `url` with the `key` parameter replaced by a placeholder.
fn redacted(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let shown = if name == "key" {
                REDACTED.to_owned()
            } else {
                value.into_owned()
            };
            (name.into_owned(), shown)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

impl DirectionsSource for HttpDirectionsSource {
    /// Fetch the route for `request`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`). If called from within a
    /// `current_thread` runtime, the method falls back to its own internal
    /// runtime, which blocks the caller's runtime until the request finishes.
    fn fetch_directions(&self, request: &DirectionsRequest) -> Result<ParsedRoute, DirectionsError> {
        let url = self.build_url(request)?;

        // block_in_place requires a multi-threaded runtime; for current_thread
        // runtimes we fall back to our own stored runtime.
        let future = self.fetch_async(url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
