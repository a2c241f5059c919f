use std::time::Duration;

use crate::config::FinderConfig;
use crate::model::{Cuisine, IngredientQuery, RecipeSummary};
use crate::pipeline::{enrich, run_search, EnrichMode, RecipeCard, SearchOutcome};
use crate::source::{RecipeSource, SpoonacularClient};
use crate::FinderError;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring a [`RecipeFinder`]
#[derive(Debug, Default)]
pub struct RecipeFinderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    mode: EnrichMode,
}

impl RecipeFinderBuilder {
    /// Take API key, base URL, timeout and enrichment mode from a loaded
    /// configuration. Later builder calls override these values.
    ///
    /// # Example
    /// ```no_run
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let config = FinderConfig::load()?;
    /// let finder = RecipeFinder::builder().config(&config).build()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn config(mut self, config: &FinderConfig) -> Self {
        self.api_key = config.api_key.clone();
        self.base_url = Some(config.base_url.clone());
        self.timeout = Some(Duration::from_secs(config.timeout));
        self.mode = config.enrich_mode;
        self
    }

    /// Set the API key for the recipe service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at a different host, e.g. a proxy or a test server
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder()
    ///     .api_key("your-api-key")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Choose how details are fetched for search results
    pub fn enrich_mode(mut self, mode: EnrichMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the configuration and create the finder
    ///
    /// No request is made here.
    ///
    /// # Errors
    /// Returns `FinderError::MissingApiKey` if no API key was provided and
    /// `FinderError::ClientError` if the HTTP client cannot be created.
    pub fn build(self) -> Result<RecipeFinder, FinderError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(FinderError::MissingApiKey)?;

        let client = SpoonacularClient::new(
            api_key,
            self.base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )?;

        Ok(RecipeFinder::with_source(Box::new(client), self.mode))
    }
}

/// Searches for recipes and enriches the results with details and links
pub struct RecipeFinder {
    source: Box<dyn RecipeSource>,
    mode: EnrichMode,
}

impl RecipeFinder {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder();
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    /// Use any recipe source, e.g. an in-memory one in tests
    pub fn with_source(source: Box<dyn RecipeSource>, mode: EnrichMode) -> Self {
        RecipeFinder { source, mode }
    }

    pub fn enrich_mode(&self) -> EnrichMode {
        self.mode
    }

    /// Search and enrich the results according to the configured mode
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_finder::{Cuisine, RecipeFinder, SearchOutcome};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let finder = RecipeFinder::builder().api_key("your-api-key").build()?;
    /// match finder.find("chicken, tomato", Cuisine::Italian).await? {
    ///     SearchOutcome::Found(cards) => println!("{} recipes", cards.len()),
    ///     SearchOutcome::NoResults => println!("nothing matched"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(
        &self,
        ingredients: &str,
        cuisine: Cuisine,
    ) -> Result<SearchOutcome, FinderError> {
        run_search(self.source.as_ref(), ingredients, cuisine, self.mode).await
    }

    /// Search without fetching any details
    pub async fn search_summaries(
        &self,
        ingredients: &str,
        cuisine: Cuisine,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        let query = IngredientQuery::parse(ingredients)?;
        self.source.search(&query, cuisine).await
    }

    /// Fetch details for one summary on demand
    pub async fn enrich(&self, summary: RecipeSummary) -> RecipeCard {
        enrich(self.source.as_ref(), summary).await
    }
}
