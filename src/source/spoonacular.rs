use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::model::{Cuisine, IngredientQuery, RecipeDetail, RecipeSummary};
use crate::source::{plain_text, RecipeSource};
use crate::FinderError;

/// Upper bound on recipes per search
pub const MAX_RESULTS: usize = 6;

/// Ranking mode: prefer recipes that use most of the given ingredients
pub const SORT_MODE: &str = "max-used-ingredients";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RecipeSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InformationResponse {
    id: Option<u64>,
    source_url: Option<String>,
    extended_ingredients: Option<Vec<ExtendedIngredient>>,
    instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    #[serde(default)]
    original: String,
}

#[derive(Debug, Deserialize)]
struct FailureResponse {
    message: String,
}

impl InformationResponse {
    fn into_detail(self) -> RecipeDetail {
        let ingredients = self
            .extended_ingredients
            .unwrap_or_default()
            .into_iter()
            .map(|ingredient| ingredient.original.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let instructions = self
            .instructions
            .as_deref()
            .map(plain_text)
            .filter(|text| !text.is_empty());

        let source_url = self
            .source_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        RecipeDetail {
            source_url,
            ingredients,
            instructions,
        }
    }
}

/// Query parameters for the ingredient search, excluding the API key
///
/// `cuisine` is only present when a filter other than `All` is selected.
pub fn search_params(query: &IngredientQuery, cuisine: Cuisine) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("includeIngredients", query.as_str().to_string()),
        ("addRecipeInformation", "true".to_string()),
        ("instructionsRequired", "true".to_string()),
        ("fillIngredients", "true".to_string()),
        ("number", MAX_RESULTS.to_string()),
        ("sort", SORT_MODE.to_string()),
    ];

    if let Some(name) = cuisine.as_param() {
        params.push(("cuisine", name.to_string()));
    }

    params
}

/// Client for the Spoonacular recipe API
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Create a client for the given API key and base URL
    ///
    /// # Errors
    /// Returns `FinderError::MissingApiKey` for a blank key and
    /// `FinderError::ClientError` if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FinderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FinderError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FinderError::ClientError)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Error text without the request URL, which carries the API key
fn redacted(error: reqwest::Error) -> String {
    error.without_url().to_string()
}

/// Describe a non-success response, using the service's message if it sent one
async fn describe_failure(response: Response) -> String {
    let status: StatusCode = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<FailureResponse>(&body) {
        Ok(failure) => format!("HTTP {}: {}", status, failure.message),
        Err(_) => format!("HTTP {}", status),
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    fn source_name(&self) -> &str {
        "spoonacular"
    }

    async fn search(
        &self,
        query: &IngredientQuery,
        cuisine: Cuisine,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        let params = search_params(query, cuisine);
        debug!("Searching recipes with {:?}", params);

        let response = self
            .client
            .get(self.endpoint("/recipes/complexSearch"))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(&params)
            .send()
            .await
            .map_err(|e| FinderError::SearchFailed(redacted(e)))?;

        if !response.status().is_success() {
            return Err(FinderError::SearchFailed(describe_failure(response).await));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| {
                FinderError::SearchFailed(format!("invalid response: {}", redacted(e)))
            })?;

        let mut results = body.results;
        results.truncate(MAX_RESULTS);
        info!("Search for '{}' returned {} recipes", query, results.len());

        Ok(results)
    }

    async fn detail(&self, id: u64) -> Result<RecipeDetail, FinderError> {
        let unavailable = |reason: String| FinderError::DetailUnavailable { id, reason };

        debug!("Fetching details for recipe {}", id);
        let response = self
            .client
            .get(self.endpoint(&format!("/recipes/{}/information", id)))
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| unavailable(redacted(e)))?;

        if !response.status().is_success() {
            return Err(unavailable(describe_failure(response).await));
        }

        let info: InformationResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("invalid response: {}", redacted(e))))?;

        if let Some(returned) = info.id {
            if returned != id {
                return Err(unavailable(format!(
                    "response describes recipe {}",
                    returned
                )));
            }
        }

        Ok(info.into_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> IngredientQuery {
        IngredientQuery::parse("chicken, tomato").unwrap()
    }

    #[test]
    fn test_params_without_cuisine() {
        let params = search_params(&query(), Cuisine::All);
        assert!(params.iter().all(|(key, _)| *key != "cuisine"));
        assert!(params.contains(&("includeIngredients", "chicken, tomato".to_string())));
        assert!(params.contains(&("number", "6".to_string())));
        assert!(params.contains(&("sort", "max-used-ingredients".to_string())));
        assert!(params.contains(&("addRecipeInformation", "true".to_string())));
        assert!(params.contains(&("fillIngredients", "true".to_string())));
        assert!(params.contains(&("instructionsRequired", "true".to_string())));
    }

    #[test]
    fn test_params_with_every_cuisine() {
        for cuisine in Cuisine::ALL.iter().skip(1) {
            let params = search_params(&query(), *cuisine);
            let value = params
                .iter()
                .find(|(key, _)| *key == "cuisine")
                .map(|(_, value)| value.as_str());
            assert_eq!(value, Some(cuisine.name()));
        }
    }

    #[test]
    fn test_params_never_contain_api_key() {
        let params = search_params(&query(), Cuisine::Thai);
        assert!(params.iter().all(|(key, _)| *key != "apiKey"));
    }

    #[test]
    fn test_blank_key_rejected() {
        let result = SpoonacularClient::new(" ", "http://localhost", Duration::from_secs(1));
        assert!(matches!(result, Err(FinderError::MissingApiKey)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            SpoonacularClient::new("key", "http://localhost:1234/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.endpoint("/recipes/complexSearch"),
            "http://localhost:1234/recipes/complexSearch"
        );
    }

    #[test]
    fn test_information_into_detail() {
        let json = r#"{
            "id": 42,
            "sourceUrl": "https://example.com/soup",
            "extendedIngredients": [
                {"original": "2 tomatoes"},
                {"original": "  "},
                {"name": "salt"}
            ],
            "instructions": "<ol><li>Chop.</li><li>Simmer.</li></ol>"
        }"#;

        let info: InformationResponse = serde_json::from_str(json).unwrap();
        let detail = info.into_detail();
        assert_eq!(detail.source_url.as_deref(), Some("https://example.com/soup"));
        assert_eq!(detail.ingredients, vec!["2 tomatoes"]);
        assert_eq!(detail.instructions.as_deref(), Some("Chop.\nSimmer."));
    }

    #[test]
    fn test_information_without_instructions() {
        let json = r#"{"id": 7, "sourceUrl": "", "extendedIngredients": null, "instructions": null}"#;
        let detail = serde_json::from_str::<InformationResponse>(json)
            .unwrap()
            .into_detail();
        assert_eq!(detail, RecipeDetail::default());
    }
}
