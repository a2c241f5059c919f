use scraper::{ElementRef, Html, Selector};

/// Elements whose boundaries start a new step
const BLOCK_ELEMENTS: [&str; 14] = [
    "p", "div", "ol", "ul", "li", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section",
    "blockquote",
];

/// Reduce recipe instructions to plain text
///
/// The recipe service returns instructions either as plain text or as an
/// HTML fragment (usually an `<ol>` of steps). List items, paragraphs and
/// `<br>`-separated segments become one step per line; other markup is
/// dropped and entities are decoded.
pub fn plain_text(raw: &str) -> String {
    if !raw.contains('<') {
        if !raw.contains('&') {
            return raw.trim().to_string();
        }
        // Entities only: decode, keep the line structure
        let fragment = Html::parse_fragment(raw);
        let text: String = fragment.root_element().text().collect();
        return text.trim().to_string();
    }

    let fragment = Html::parse_fragment(raw);

    let steps: Vec<String> = Selector::parse("li")
        .map(|selector| {
            fragment
                .select(&selector)
                .map(|li| collapse_whitespace(&li.text().collect::<String>()))
                .filter(|step| !step.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !steps.is_empty() {
        return steps.join("\n");
    }

    let mut text = String::new();
    collect_blocks(fragment.root_element(), &mut text);
    text.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append the text under `element`, with a line break at every block
/// boundary and `<br>`. Line breaks inside text nodes are plain whitespace.
fn collect_blocks(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.extend(text.chars().map(|c| if c == '\n' { ' ' } else { c }));
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            collect_blocks(child, out);
            if block {
                out.push('\n');
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
