//! Inbound-message text scanning: URL extraction and pin-code detection.

use regex::Regex;

/// Permissive scan for `http(s)://` URLs in free-form text. This is a
/// message-level scan, not strict validation — anything up to the next
/// whitespace counts, and downstream normalization deals with the rest.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<String> {
    url_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Finds a 6-digit pin code in message text.
///
/// A labeled form (`pin 110001`, `code: 110001`) wins; otherwise a bare
/// 6-digit run counts, but only outside URL spans so product IDs embedded
/// in links are never mistaken for a pin.
#[must_use]
pub fn extract_pin(text: &str) -> Option<String> {
    let labeled =
        Regex::new(r"(?i)\b(?:pin|code)\s*[:\-]?\s*(\d{6})\b").expect("valid labeled pin regex");
    if let Some(cap) = labeled.captures(text) {
        return Some(cap[1].to_owned());
    }

    let without_urls = url_regex().replace_all(text, " ");
    let bare = Regex::new(r"\b(\d{6})\b").expect("valid bare pin regex");
    bare.captures(&without_urls).map(|cap| cap[1].to_owned())
}

fn url_regex() -> Regex {
    Regex::new(r"https?://\S+").expect("valid url scan regex")
}
