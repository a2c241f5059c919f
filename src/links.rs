//! Alternative recipe sources built from a recipe title.
//!
//! These links are shown next to every recipe card and are the only thing
//! left to show when the detail request fails.

use url::form_urlencoded;

use crate::model::LinkSet;

/// Build the fixed set of external search links for a recipe title
///
/// Spaces become `+`; any other character that would break the URL is
/// percent-encoded. A blank title yields the same templates with an empty
/// search term.
///
/// # Example
/// ```
/// use recipe_finder::build_links;
///
/// let links = build_links("Chicken Tikka Masala");
/// assert_eq!(links.allrecipes, "https://www.allrecipes.com/search?q=Chicken+Tikka+Masala");
/// ```
pub fn build_links(title: &str) -> LinkSet {
    let term = search_term(title);

    LinkSet {
        video: format!("https://www.youtube.com/results?search_query={term}+recipe+tutorial"),
        allrecipes: format!("https://www.allrecipes.com/search?q={term}"),
        food_network: format!("https://www.foodnetwork.com/search/{term}-"),
    }
}

fn search_term(title: &str) -> String {
    form_urlencoded::byte_serialize(title.trim().as_bytes()).collect()
}
