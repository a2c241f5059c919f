use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FinderError;

/// Comma-separated ingredient list as typed by the user.
///
/// The value is trimmed but otherwise passed to the search endpoint
/// untouched; splitting and matching happen upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery(String);

impl IngredientQuery {
    /// Validate raw user input
    ///
    /// # Errors
    /// Returns `FinderError::InvalidQuery` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, FinderError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FinderError::InvalidQuery);
        }
        Ok(IngredientQuery(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cuisine filter offered to the user. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cuisine {
    #[default]
    All,
    American,
    Italian,
    Asian,
    Mexican,
    Mediterranean,
    French,
    Indian,
    Chinese,
    Japanese,
    Thai,
}

impl Cuisine {
    /// Every cuisine in display order
    pub const ALL: [Cuisine; 11] = [
        Cuisine::All,
        Cuisine::American,
        Cuisine::Italian,
        Cuisine::Asian,
        Cuisine::Mexican,
        Cuisine::Mediterranean,
        Cuisine::French,
        Cuisine::Indian,
        Cuisine::Chinese,
        Cuisine::Japanese,
        Cuisine::Thai,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Cuisine::All => "All",
            Cuisine::American => "American",
            Cuisine::Italian => "Italian",
            Cuisine::Asian => "Asian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::French => "French",
            Cuisine::Indian => "Indian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Japanese => "Japanese",
            Cuisine::Thai => "Thai",
        }
    }

    /// Value for the `cuisine` query parameter, `None` when unfiltered
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Cuisine::All => None,
            other => Some(other.name()),
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cuisine {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Cuisine::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| FinderError::UnknownCuisine(wanted.to_string()))
    }
}

/// Lightweight recipe record returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Correlation key for the detail request
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    /// How many of the requested ingredients the recipe uses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_ingredient_count: Option<u32>,
    /// Ingredients the recipe needs beyond the requested ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed_ingredient_count: Option<u32>,
}

impl RecipeSummary {
    /// Labels for the dietary flags that are set, in a fixed order
    pub fn dietary_badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.vegetarian {
            badges.push("Vegetarian");
        }
        if self.vegan {
            badges.push("Vegan");
        }
        if self.gluten_free {
            badges.push("Gluten Free");
        }
        badges
    }
}

/// Full ingredient list and instructions for one recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub source_url: Option<String>,
    pub ingredients: Vec<String>,
    /// Plain-text instructions, `None` when the API has none
    pub instructions: Option<String>,
}

/// External search URLs derived from a recipe title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSet {
    pub video: String,
    pub allrecipes: String,
    pub food_network: String,
}

impl LinkSet {
    /// Links paired with their display labels
    pub fn labelled(&self) -> [(&'static str, &str); 3] {
        [
            ("YouTube Tutorials", &self.video),
            ("AllRecipes", &self.allrecipes),
            ("Food Network", &self.food_network),
        ]
    }
}
