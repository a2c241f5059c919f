use recipe_finder::{find_recipes, Cuisine, SearchOutcome};

/// This test is ignored by default since it requires network access and
/// SPOONACULAR_API_KEY
#[tokio::test]
#[ignore]
async fn test_live_search() {
    let outcome = find_recipes("chicken, tomato", Cuisine::Italian)
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Found(cards) => {
            assert!(cards.len() <= 6);
            assert!(cards.iter().all(|card| !card.summary.title.is_empty()));
        }
        SearchOutcome::NoResults => {}
    }
}
