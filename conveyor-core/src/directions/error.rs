use std::time::Duration;

use thiserror::Error;

/// Errors from [`crate::directions::DirectionsSource::fetch_directions`] and
/// [`crate::RouteQuery::fetch_route`].
///
/// The `Display` text doubles as the message reported to callers, so the
/// configuration variants read as instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// Origin latitude or longitude is unset or empty.
    #[error("please make sure origin is set correctly")]
    MissingOrigin,

    /// Destination latitude or longitude is unset or empty.
    #[error("please make sure destination is set correctly")]
    MissingDestination,

    /// The access key is unset or empty.
    #[error("please make sure the api key is set correctly")]
    MissingApiKey,

    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid directions endpoint {url:?}: {message}")]
    InvalidUrl {
        /// Endpoint as configured.
        url: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Request URL with the access key redacted.
        url: String,
        /// Timeout that elapsed.
        timeout: Duration,
    },

    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP status {status}: {message}")]
    HttpError {
        /// Request URL with the access key redacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Transport diagnostic.
        message: String,
    },

    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL with the access key redacted.
        url: String,
        /// Transport diagnostic.
        message: String,
    },

    /// The response body was not JSON of the expected shape.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Decoder diagnostic.
        message: String,
    },

    /// The service reported a failure status such as `REQUEST_DENIED`.
    #[error("directions service returned {status}: {message}")]
    ServiceError {
        /// Status string reported by the service.
        status: String,
        /// Accompanying error message, empty when the service sent none.
        message: String,
    },
}

impl DirectionsError {
    /// Whether the error stems from missing query configuration rather than
    /// from talking to the service.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingOrigin | Self::MissingDestination | Self::MissingApiKey
        )
    }
}
