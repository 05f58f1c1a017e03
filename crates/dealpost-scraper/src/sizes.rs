//! Meesho size-chip extraction.
//!
//! Absence of size markup is read optimistically: no chips does not mean no
//! stock, it means "All". Broad availability (five or more distinct
//! tokens) also collapses to "All".

use scraper::Html;

use crate::extract::parse_selector;

const SIZE_TOKENS: [&str; 6] = ["S", "M", "L", "XL", "XXL", "FREE"];

/// Distinct tokens at or above this count collapse to "All".
const ALL_THRESHOLD: usize = 5;

const SIZES_ALL: &str = "All";

/// Collects size tokens from the first candidate selector that yields any,
/// de-duplicated in first-seen order and joined with `", "`.
pub(crate) fn extract_sizes(document: &Html, selector_strings: &[String]) -> String {
    for raw in selector_strings {
        let Some(selector) = parse_selector(raw) else {
            continue;
        };

        let mut tokens: Vec<String> = Vec::new();
        for element in document.select(&selector) {
            let text = element
                .text()
                .collect::<String>()
                .trim()
                .to_uppercase();
            if text.is_empty() || tokens.contains(&text) {
                continue;
            }
            if SIZE_TOKENS.iter().any(|t| text.contains(t)) {
                tokens.push(text);
            }
        }

        if tokens.len() >= ALL_THRESHOLD {
            return SIZES_ALL.to_owned();
        }
        if !tokens.is_empty() {
            return tokens.join(", ");
        }
    }

    SIZES_ALL.to_owned()
}
