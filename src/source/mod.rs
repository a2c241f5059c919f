mod instructions;
mod spoonacular;

pub use instructions::plain_text;
pub use spoonacular::{search_params, SpoonacularClient, MAX_RESULTS, SORT_MODE};

use async_trait::async_trait;

use crate::model::{Cuisine, IngredientQuery, RecipeDetail, RecipeSummary};
use crate::FinderError;

/// A recipe service that can search by ingredients and describe one recipe
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "spoonacular")
    fn source_name(&self) -> &str;

    /// Search for up to `MAX_RESULTS` recipes using the given ingredients
    ///
    /// Results keep the order the service returned them in.
    async fn search(
        &self,
        query: &IngredientQuery,
        cuisine: Cuisine,
    ) -> Result<Vec<RecipeSummary>, FinderError>;

    /// Fetch ingredients and instructions for one recipe
    ///
    /// Failures are reported as `FinderError::DetailUnavailable`.
    async fn detail(&self, id: u64) -> Result<RecipeDetail, FinderError>;
}
