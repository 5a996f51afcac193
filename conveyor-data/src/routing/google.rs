//! Directions API response types.
//!
//! Only the fields the conveyor reads are modelled; everything else in the
//! payload (polylines, bounds, waypoints, fares) is ignored during
//! deserialisation.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions#DirectionsResponses>

use conveyor_core::{LegSummary, ParsedRoute, RouteStep};
use serde::Deserialize;

/// Top-level Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"OK"` - At least one route was found
    /// - `"ZERO_RESULTS"` - No route exists between the points
    /// - `"REQUEST_DENIED"` - The key was rejected
    /// - `"INVALID_REQUEST"` - Required parameters were missing or malformed
    /// - `"OVER_QUERY_LIMIT"` - The key exceeded its quota
    pub status: Option<String>,

    /// Optional detail accompanying a failure status.
    pub error_message: Option<String>,

    /// Routes between origin and destination.
    pub routes: Option<Vec<Route>>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    ///
    /// A missing status is read as success so that minimal payloads still
    /// decode.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("OK" | "ZERO_RESULTS"))
    }
}

/// One alternative route.
#[derive(Debug, Deserialize)]
pub struct Route {
    pub summary: String,
    pub legs: Vec<Leg>,
}

/// Journey between two consecutive waypoints.
#[derive(Debug, Deserialize)]
pub struct Leg {
    pub start_address: String,
    pub end_address: String,
    pub distance: TextValue,
    pub duration: TextValue,
    pub steps: Vec<Step>,
}

/// A measurement carrying display text; the numeric value is not needed.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub text: String,
}

/// One navigation instruction.
#[derive(Debug, Deserialize)]
pub struct Step {
    pub html_instructions: String,
}

/// Flatten decoded routes into summaries, legs and steps in response order.
pub fn flatten(routes: Vec<Route>) -> ParsedRoute {
    let mut parsed = ParsedRoute::default();
    for route in routes {
        parsed.summaries.push(route.summary);
        for leg in route.legs {
            parsed.legs.push(LegSummary {
                start_address: leg.start_address,
                end_address: leg.end_address,
                distance_text: leg.distance.text,
                duration_text: leg.duration.text,
            });
            parsed.steps.extend(
                leg.steps
                    .into_iter()
                    .map(|step| RouteStep::new(step.html_instructions)),
            );
        }
    }
    parsed
}
