//! Flattened view of a directions response.
//!
//! The upstream service nests steps inside legs inside routes. Callers of this
//! crate only ever search the text, so the hierarchy is discarded and each
//! level is kept as a single ordered sequence.

/// Route text extracted from one directions response.
///
/// The value is rebuilt on every fetch and never cached.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRoute {
    /// One summary per returned route, in response order.
    pub summaries: Vec<String>,
    /// Every leg across all routes, in response order.
    pub legs: Vec<LegSummary>,
    /// Every step across all legs, in response order.
    pub steps: Vec<RouteStep>,
}

/// Addresses and human-readable totals for a single leg.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegSummary {
    /// Address the leg starts from.
    pub start_address: String,
    /// Address the leg ends at.
    pub end_address: String,
    /// Display text for the leg distance, e.g. `"4.2 mi"`.
    pub distance_text: String,
    /// Display text for the leg duration, e.g. `"9 mins"`.
    pub duration_text: String,
}

impl LegSummary {
    /// Construct a leg from its four text fields.
    #[must_use]
    pub fn new(
        start_address: impl Into<String>,
        end_address: impl Into<String>,
        distance_text: impl Into<String>,
        duration_text: impl Into<String>,
    ) -> Self {
        Self {
            start_address: start_address.into(),
            end_address: end_address.into(),
            distance_text: distance_text.into(),
            duration_text: duration_text.into(),
        }
    }
}

/// A single navigation step.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteStep {
    /// Instruction text as returned by the service, HTML markup included.
    pub instruction: String,
}

impl RouteStep {
    /// Construct a step from its instruction text.
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }
}

impl ParsedRoute {
    /// Return `true` when the service returned no routes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty() && self.legs.is_empty() && self.steps.is_empty()
    }

    /// Whether any route summary contains `needle`.
    ///
    /// `needle` must already be lower-cased; each summary is lower-cased
    /// before comparison.
    #[must_use]
    pub fn summaries_mention(&self, needle: &str) -> bool {
        self.summaries
            .iter()
            .any(|summary| contains_lowercased(summary, needle))
    }

    /// Whether any leg's start address contains `needle`.
    ///
    /// End addresses are deliberately not searched.
    #[must_use]
    pub fn legs_mention(&self, needle: &str) -> bool {
        self.legs
            .iter()
            .any(|leg| contains_lowercased(&leg.start_address, needle))
    }

    /// Whether any step instruction contains `needle`.
    ///
    /// Instructions are matched as raw HTML, so markup between words prevents
    /// a match while text outside tags is found as usual.
    #[must_use]
    pub fn steps_mention(&self, needle: &str) -> bool {
        self.steps
            .iter()
            .any(|step| contains_lowercased(&step.instruction, needle))
    }

    /// Search summaries, then leg start addresses, then step instructions.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.summaries_mention(needle) || self.legs_mention(needle) || self.steps_mention(needle)
    }
}

fn contains_lowercased(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
