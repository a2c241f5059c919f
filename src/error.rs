use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum FinderError {
    /// No usable ingredients were supplied
    #[error("Please enter at least one ingredient")]
    InvalidQuery,

    /// Cuisine name outside the supported set
    #[error("Unknown cuisine: {0}")]
    UnknownCuisine(String),

    /// The search request could not be completed or decoded
    #[error("Recipe search failed: {0}")]
    SearchFailed(String),

    /// The detail request for a single recipe failed
    #[error("Details unavailable for recipe {id}: {reason}")]
    DetailUnavailable { id: u64, reason: String },

    /// No API key in configuration or environment
    #[error(
        "Missing API key: set SPOONACULAR_API_KEY or RECIPE_FINDER__API_KEY in the environment"
    )]
    MissingApiKey,

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    ClientError(reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl FinderError {
    /// Whether this error stems from bad input or configuration rather than
    /// a failed request.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FinderError::InvalidQuery
                | FinderError::UnknownCuisine(_)
                | FinderError::MissingApiKey
                | FinderError::ConfigError(_)
        )
    }
}
