use std::fmt;
use std::str::FromStr;

use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::links::build_links;
use crate::model::{Cuisine, IngredientQuery, LinkSet, RecipeDetail, RecipeSummary};
use crate::source::RecipeSource;
use crate::FinderError;

/// How recipe details are fetched after a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichMode {
    /// Do not fetch details; cards carry only summary and links
    Skip,
    /// One detail request at a time, in result order (default)
    #[default]
    Sequential,
    /// All detail requests in flight at once; result order is kept
    Concurrent,
}

impl FromStr for EnrichMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(EnrichMode::Skip),
            "sequential" => Ok(EnrichMode::Sequential),
            "concurrent" => Ok(EnrichMode::Concurrent),
            other => Err(format!(
                "unknown mode '{}', expected skip, sequential or concurrent",
                other
            )),
        }
    }
}

impl fmt::Display for EnrichMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnrichMode::Skip => "skip",
            EnrichMode::Sequential => "sequential",
            EnrichMode::Concurrent => "concurrent",
        };
        f.write_str(name)
    }
}

/// What is known about a recipe beyond its summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment {
    /// Details were not requested
    NotRequested,
    /// The detail request succeeded
    Detailed { detail: RecipeDetail },
    /// The detail request failed; only the links are available
    Unavailable { reason: String },
}

/// One search result, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub summary: RecipeSummary,
    pub links: LinkSet,
    pub enrichment: Enrichment,
}

impl RecipeCard {
    /// Card with links but without details
    pub fn from_summary(summary: RecipeSummary) -> Self {
        let links = build_links(&summary.title);
        RecipeCard {
            summary,
            links,
            enrichment: Enrichment::NotRequested,
        }
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        match &self.enrichment {
            Enrichment::Detailed { detail } => Some(detail),
            _ => None,
        }
    }
}

/// Result of a search that reached the recipe service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "recipes", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// At least one recipe matched, in the service's ranking order
    Found(Vec<RecipeCard>),
    /// The search succeeded but nothing matched
    NoResults,
}

impl SearchOutcome {
    pub fn cards(&self) -> &[RecipeCard] {
        match self {
            SearchOutcome::Found(cards) => cards,
            SearchOutcome::NoResults => &[],
        }
    }
}

/// Attach details and links to one summary
///
/// A failed detail request never fails the card: the reason is kept and the
/// links remain the way forward.
pub async fn enrich(source: &dyn RecipeSource, summary: RecipeSummary) -> RecipeCard {
    let mut card = RecipeCard::from_summary(summary);

    card.enrichment = match source.detail(card.summary.id).await {
        Ok(detail) => Enrichment::Detailed { detail },
        Err(e) => {
            warn!(
                "Couldn't load details for '{}': {}",
                card.summary.title, e
            );
            Enrichment::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    card
}

/// Turn summaries into cards according to `mode`, keeping their order
pub async fn enrich_all(
    source: &dyn RecipeSource,
    summaries: Vec<RecipeSummary>,
    mode: EnrichMode,
) -> Vec<RecipeCard> {
    match mode {
        EnrichMode::Skip => summaries.into_iter().map(RecipeCard::from_summary).collect(),
        EnrichMode::Sequential => {
            let mut cards = Vec::with_capacity(summaries.len());
            for summary in summaries {
                cards.push(enrich(source, summary).await);
            }
            cards
        }
        EnrichMode::Concurrent => {
            join_all(summaries.into_iter().map(|summary| enrich(source, summary))).await
        }
    }
}

/// Run a search and enrich every result
///
/// # Errors
/// Returns `FinderError::InvalidQuery` before any request when the
/// ingredient list is blank, and `FinderError::SearchFailed` when the search
/// itself fails. Detail failures are recorded on the affected card only.
pub async fn run_search(
    source: &dyn RecipeSource,
    ingredients: &str,
    cuisine: Cuisine,
    mode: EnrichMode,
) -> Result<SearchOutcome, FinderError> {
    let query = IngredientQuery::parse(ingredients)?;

    debug!(
        "Searching {} for '{}' (cuisine: {}, details: {})",
        source.source_name(),
        query,
        cuisine,
        mode
    );
    let summaries = source.search(&query, cuisine).await?;

    if summaries.is_empty() {
        info!("No recipes found for '{}'", query);
        return Ok(SearchOutcome::NoResults);
    }

    let cards = enrich_all(source, summaries, mode).await;
    let unavailable = cards
        .iter()
        .filter(|card| matches!(card.enrichment, Enrichment::Unavailable { .. }))
        .count();
    if unavailable > 0 {
        info!(
            "{} of {} recipes fell back to alternative links",
            unavailable,
            cards.len()
        );
    }

    Ok(SearchOutcome::Found(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct FakeSource {
        results: Vec<RecipeSummary>,
        failing_details: HashSet<u64>,
        detail_calls: Mutex<Vec<u64>>,
        search_calls: Mutex<usize>,
    }

    impl FakeSource {
        fn new(titles: &[&str]) -> Self {
            let results = titles
                .iter()
                .enumerate()
                .map(|(i, title)| summary(i as u64 + 1, title))
                .collect();
            FakeSource {
                results,
                failing_details: HashSet::new(),
                detail_calls: Mutex::new(Vec::new()),
                search_calls: Mutex::new(0),
            }
        }

        fn failing(mut self, id: u64) -> Self {
            self.failing_details.insert(id);
            self
        }
    }

    fn summary(id: u64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id,
            title: title.to_string(),
            image: None,
            ready_in_minutes: 20,
            servings: 2,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            used_ingredient_count: None,
            missed_ingredient_count: None,
        }
    }

    #[async_trait]
    impl RecipeSource for FakeSource {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn search(
            &self,
            _query: &IngredientQuery,
            _cuisine: Cuisine,
        ) -> Result<Vec<RecipeSummary>, FinderError> {
            *self.search_calls.lock().unwrap() += 1;
            Ok(self.results.clone())
        }

        async fn detail(&self, id: u64) -> Result<RecipeDetail, FinderError> {
            self.detail_calls.lock().unwrap().push(id);
            if self.failing_details.contains(&id) {
                return Err(FinderError::DetailUnavailable {
                    id,
                    reason: "HTTP 500".to_string(),
                });
            }
            Ok(RecipeDetail {
                source_url: Some(format!("https://example.com/{}", id)),
                ingredients: vec!["1 egg".to_string()],
                instructions: None,
            })
        }
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_calls() {
        let source = FakeSource::new(&["Omelette"]);
        let result = run_search(&source, "  ", Cuisine::All, EnrichMode::Sequential).await;

        assert!(matches!(result, Err(FinderError::InvalidQuery)));
        assert_eq!(*source.search_calls.lock().unwrap(), 0);
        assert!(source.detail_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_results_are_not_an_error() {
        let source = FakeSource::new(&[]);
        let outcome = run_search(&source, "kale", Cuisine::All, EnrichMode::Sequential)
            .await
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn test_detail_failure_is_isolated() {
        let source = FakeSource::new(&["Soup", "Stew", "Salad"]).failing(2);
        let outcome = run_search(&source, "carrot", Cuisine::All, EnrichMode::Sequential)
            .await
            .unwrap();

        let cards = outcome.cards();
        assert_eq!(cards.len(), 3);
        assert!(cards[0].detail().is_some());
        assert!(cards[2].detail().is_some());
        match &cards[1].enrichment {
            Enrichment::Unavailable { reason } => assert!(reason.contains("HTTP 500")),
            other => panic!("Expected fallback, got {:?}", other),
        }
        assert_eq!(cards[1].summary.title, "Stew");
        assert_eq!(cards[1].links, build_links("Stew"));
    }

    #[tokio::test]
    async fn test_sequential_follows_result_order() {
        let source = FakeSource::new(&["A", "B", "C", "D"]);
        run_search(&source, "egg", Cuisine::All, EnrichMode::Sequential)
            .await
            .unwrap();
        assert_eq!(*source.detail_calls.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_concurrent_keeps_order() {
        let source = FakeSource::new(&["A", "B", "C", "D", "E", "F"]).failing(4);
        let outcome = run_search(&source, "egg", Cuisine::All, EnrichMode::Concurrent)
            .await
            .unwrap();

        let ids: Vec<u64> = outcome.cards().iter().map(|c| c.summary.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(outcome.cards()[3].detail().is_none());
        assert_eq!(source.detail_calls.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_skip_mode_issues_no_detail_calls() {
        let source = FakeSource::new(&["A", "B"]);
        let outcome = run_search(&source, "egg", Cuisine::All, EnrichMode::Skip)
            .await
            .unwrap();

        assert!(source.detail_calls.lock().unwrap().is_empty());
        assert!(outcome
            .cards()
            .iter()
            .all(|c| c.enrichment == Enrichment::NotRequested));
    }

    #[tokio::test]
    async fn test_enrich_is_repeatable() {
        let source = FakeSource::new(&["Soup"]);
        let first = enrich(&source, summary(1, "Soup")).await;
        let second = enrich(&source, summary(1, "Soup")).await;

        assert_eq!(first, second);
        assert_eq!(*source.detail_calls.lock().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_enrich_mode_from_str() {
        assert_eq!("Concurrent".parse::<EnrichMode>(), Ok(EnrichMode::Concurrent));
        assert_eq!("skip".parse::<EnrichMode>(), Ok(EnrichMode::Skip));
        assert!("parallel".parse::<EnrichMode>().is_err());
    }
}
