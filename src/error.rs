//! Error types shared across the crate.

use crate::map::CityId;

/// Errors that can occur while building or loading a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("duplicate city key: '{0}'")]
    DuplicateCity(String),

    #[error("duplicate route key: '{0}'")]
    DuplicateRouteKey(String),

    #[error("route '{route}' references unknown city '{city}'")]
    UnknownRouteCity { route: String, city: String },

    #[error("route '{0}' connects a city to itself")]
    SelfLoop(String),

    #[error("cities '{0}' and '{1}' are already connected")]
    DuplicateRoute(String, String),

    #[error("city '{0}' has coordinates outside the valid range")]
    InvalidCoordinates(String),

    #[error("map has more than {0} entries of one kind")]
    TooLarge(usize),

    #[error("failed to parse map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a generation step produced no contract.
///
/// Every variant is a retryable, non-fatal outcome: the caller may try again
/// or fall back to a simpler generation mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error("unknown city id {0:?}")]
    UnknownCity(CityId),

    #[error("expected 2 starting cities, got {0}")]
    WrongStartingCityCount(usize),

    #[error("no active cities to generate from")]
    NoActiveCities,

    #[error("no candidate destinations in range")]
    NoCandidates,

    #[error("every direction bucket is empty")]
    NoDirection,

    #[error("no commodity left after exclusions")]
    NoCommodities,

    #[error("no destination left after exclusions")]
    NoDestination,

    #[error("no commodity far enough from market destination '{0}'")]
    NoMarketCommodity(String),
}

impl GenerationFailure {
    /// Returns true for failures that indicate a content or map-design problem
    /// rather than an ordinary empty draw.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, GenerationFailure::NoMarketCommodity(_))
    }

    /// Returns true for failures caused by malformed arguments.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            GenerationFailure::UnknownCity(_)
                | GenerationFailure::WrongStartingCityCount(_)
        )
    }

    /// Short stable name used for tallies and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            GenerationFailure::UnknownCity(_) => "unknown_city",
            GenerationFailure::WrongStartingCityCount(_) => "wrong_starting_city_count",
            GenerationFailure::NoActiveCities => "no_active_cities",
            GenerationFailure::NoCandidates => "no_candidates",
            GenerationFailure::NoDirection => "no_direction",
            GenerationFailure::NoCommodities => "no_commodities",
            GenerationFailure::NoDestination => "no_destination",
            GenerationFailure::NoMarketCommodity(_) => "no_market_commodity",
        }
    }
}

/// Result type for the generation pipeline.
pub type Generated<T> = Result<T, GenerationFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classification() {
        assert!(GenerationFailure::NoMarketCommodity("x".into()).is_unexpected());
        assert!(!GenerationFailure::NoCandidates.is_unexpected());
        assert!(GenerationFailure::UnknownCity(CityId(99)).is_bad_input());
        assert!(GenerationFailure::WrongStartingCityCount(3).is_bad_input());
        assert!(!GenerationFailure::NoDestination.is_bad_input());
    }

    #[test]
    fn bad_input_variants() {
        let bad: Vec<&str> = [
            GenerationFailure::UnknownCity(CityId(0)),
            GenerationFailure::WrongStartingCityCount(0),
            GenerationFailure::NoActiveCities,
            GenerationFailure::NoCandidates,
            GenerationFailure::NoDirection,
            GenerationFailure::NoCommodities,
            GenerationFailure::NoDestination,
            GenerationFailure::NoMarketCommodity(String::new()),
        ]
        .iter()
        .filter(|f| f.is_bad_input())
        .map(|f| f.name())
        .collect();
        assert_eq!(bad, ["unknown_city", "wrong_starting_city_count"]);
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            GenerationFailure::WrongStartingCityCount(1).to_string(),
            "expected 2 starting cities, got 1"
        );
        assert_eq!(
            MapError::SelfLoop("a-a".into()).to_string(),
            "route 'a-a' connects a city to itself"
        );
    }
}
