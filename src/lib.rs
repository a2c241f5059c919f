pub mod builder;
pub mod config;
pub mod error;
pub mod links;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod source;

pub use builder::{RecipeFinder, RecipeFinderBuilder};
pub use config::FinderConfig;
pub use error::FinderError;
pub use links::build_links;
pub use model::{Cuisine, IngredientQuery, LinkSet, RecipeDetail, RecipeSummary};
pub use pipeline::{EnrichMode, Enrichment, RecipeCard, SearchOutcome};
pub use source::{RecipeSource, SpoonacularClient};

/// Find recipes using configuration from `recipe-finder.toml` and the
/// environment
///
/// # Example
/// ```no_run
/// # use recipe_finder::{find_recipes, Cuisine};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = find_recipes("chicken, tomato", Cuisine::All).await?;
/// println!("{} recipes", outcome.cards().len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Fails with `FinderError::MissingApiKey` before any request when no key is
/// configured.
pub async fn find_recipes(
    ingredients: &str,
    cuisine: Cuisine,
) -> Result<SearchOutcome, FinderError> {
    let config = FinderConfig::load()?;
    config.require_api_key()?;

    RecipeFinder::builder()
        .config(&config)
        .build()?
        .find(ingredients, cuisine)
        .await
}
