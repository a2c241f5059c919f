//! Markdown-flavoured text output for search results.

use std::fmt;

use crate::model::LinkSet;
use crate::pipeline::{Enrichment, RecipeCard, SearchOutcome};

pub const NO_RESULTS_MESSAGE: &str =
    "No recipes found with these ingredients. Try different combinations!";

const MISSING_INSTRUCTIONS: &str = "_Detailed instructions available in the recipe links above._";

/// Render a whole search outcome
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoResults => format!("{}\n", NO_RESULTS_MESSAGE),
        SearchOutcome::Found(cards) => {
            let mut out = String::from("## Found Recipes\n");
            for card in cards {
                out.push('\n');
                out.push_str(&render_card(card));
                out.push_str("\n---\n");
            }
            out
        }
    }
}

/// Render a single recipe card
pub fn render_card(card: &RecipeCard) -> String {
    CardText(card).to_string()
}

struct CardText<'a>(&'a RecipeCard);

impl fmt::Display for CardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.0;
        let summary = &card.summary;

        writeln!(f, "### {}", summary.title)?;
        if let Some(image) = &summary.image {
            writeln!(f, "![{}]({})", summary.title, image)?;
        }
        writeln!(f, "Ready in: {} minutes", summary.ready_in_minutes)?;
        writeln!(f, "Servings: {}", summary.servings)?;
        if let (Some(used), Some(missed)) = (
            summary.used_ingredient_count,
            summary.missed_ingredient_count,
        ) {
            writeln!(f, "Uses {} of your ingredients, {} more needed", used, missed)?;
        }
        let badges = summary.dietary_badges();
        if !badges.is_empty() {
            writeln!(f, "{}", badges.join(" | "))?;
        }

        match &card.enrichment {
            Enrichment::Detailed { detail } => {
                writeln!(f, "\n#### Learn More")?;
                if let Some(url) = &detail.source_url {
                    writeln!(f, "[Original Recipe]({})", url)?;
                }
                writeln!(f, "\n#### Alternative Recipe Sources")?;
                write_links(f, &card.links)?;

                writeln!(f, "\n#### Ingredients:")?;
                for ingredient in &detail.ingredients {
                    writeln!(f, "- {}", ingredient)?;
                }
                writeln!(f, "\n#### Instructions:")?;
                writeln!(
                    f,
                    "{}",
                    detail.instructions.as_deref().unwrap_or(MISSING_INSTRUCTIONS)
                )
            }
            Enrichment::Unavailable { .. } => {
                writeln!(
                    f,
                    "\nCouldn't load detailed recipe information. Please try the alternative sources below."
                )?;
                writeln!(f, "\n#### Find Recipe Here")?;
                write_links(f, &card.links)
            }
            Enrichment::NotRequested => {
                writeln!(f, "\n#### Recipe Sources")?;
                write_links(f, &card.links)
            }
        }
    }
}

fn write_links(f: &mut fmt::Formatter<'_>, links: &LinkSet) -> fmt::Result {
    for (label, url) in links.labelled() {
        writeln!(f, "[{}]({})", label, url)?;
    }
    Ok(())
}
