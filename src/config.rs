use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pipeline::EnrichMode;
use crate::FinderError;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Recipe finder configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// API key for the recipe service (can also be set via SPOONACULAR_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the recipe service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// How recipe details are fetched after a search
    #[serde(default)]
    pub enrich_mode: EnrichMode,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            enrich_mode: EnrichMode::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// If no API key was found, SPOONACULAR_API_KEY is used.
    pub fn load() -> Result<Self, ConfigError> {
        let config = load_config()?;
        Ok(config.with_fallback_key(std::env::var(API_KEY_ENV).ok()))
    }

    /// Use `fallback` when the configured key is absent or blank
    fn with_fallback_key(mut self, fallback: Option<String>) -> Self {
        self.api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or(fallback);
        self
    }

    /// The configured API key
    ///
    /// # Errors
    /// Returns `FinderError::MissingApiKey` when the key is absent or blank,
    /// so callers can stop before issuing any request.
    pub fn require_api_key(&self) -> Result<&str, FinderError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(FinderError::MissingApiKey)
    }
}

/// Load configuration from `recipe-finder.toml` and `RECIPE_FINDER__*`
/// environment variables, e.g. `RECIPE_FINDER__TIMEOUT=10`.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-finder").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
