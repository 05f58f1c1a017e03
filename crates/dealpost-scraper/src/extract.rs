//! Field extraction from parsed product pages.
//!
//! Each field runs an ordered strategy chain; the first strategy producing
//! a non-empty result wins. Every selector lookup is independently
//! guarded — a missing element, malformed JSON-LD, or an invalid
//! configured selector falls through to the next strategy and can never
//! abort extraction of the other fields.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use dealpost_core::record::Platform;
use dealpost_core::rules::{RulesFile, SelectorSet};

use crate::{jsonld, sizes, stock};

/// Raw field values scraped from one product page, before derivation and
/// normalization build the final record.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub raw_title: Option<String>,
    pub raw_price: Option<String>,
    pub image_url: Option<String>,
    pub out_of_stock: bool,
    /// Populated for Meesho only.
    pub sizes: Option<String>,
}

/// Extracts all product fields from raw HTML for the given platform.
///
/// Platforms without a configured selector set (notably
/// [`Platform::Generic`]) run on fallback strategies alone.
#[must_use]
pub fn extract_fields(html: &str, platform: Platform, rules: &RulesFile) -> Extracted {
    let document = Html::parse_document(html);
    let empty = SelectorSet::default();
    let selectors = rules.selectors(platform).unwrap_or(&empty);

    Extracted {
        raw_title: extract_title(&document, selectors),
        raw_price: extract_price(&document, html, selectors),
        image_url: extract_image(&document, selectors),
        out_of_stock: stock::out_of_stock(&document),
        sizes: (platform == Platform::Meesho)
            .then(|| sizes::extract_sizes(&document, &selectors.sizes)),
    }
}

/// Title chain: platform selectors (concatenated) → JSON-LD product name →
/// `og:title` → `meta[name=title]` → `<title>` → first `<h1>`.
fn extract_title(document: &Html, selectors: &SelectorSet) -> Option<String> {
    select_concat(document, &selectors.title)
        .or_else(|| jsonld::product_name(document))
        .or_else(|| meta_content(document, r#"meta[property="og:title"]"#))
        .or_else(|| meta_content(document, r#"meta[name="title"]"#))
        .or_else(|| first_text(document, "title"))
        .or_else(|| first_text(document, "h1"))
}

/// Price chain: JSON-LD `offers.price` → price meta tags → platform
/// selectors (concatenated) → rupee-adjacent digit scan of the raw page.
fn extract_price(document: &Html, raw_html: &str, selectors: &SelectorSet) -> Option<String> {
    jsonld::offer_price(document)
        .or_else(|| meta_content(document, r#"meta[property="product:price:amount"]"#))
        .or_else(|| meta_content(document, r#"meta[name="twitter:data1"]"#))
        .or_else(|| select_concat(document, &selectors.price))
        .or_else(|| rupee_scan(raw_html))
}

/// Image: the platform selector's first match, taking `src`, then
/// `data-src`, then a `url(...)` from an inline background style. Values
/// that are not absolute `http(s)` URLs fail validation and are dropped.
fn extract_image(document: &Html, selectors: &SelectorSet) -> Option<String> {
    let selector = parse_selector(selectors.image.as_deref()?)?;
    let element = document.select(&selector).next()?;
    image_url_from(element).filter(|u| u.starts_with("http://") || u.starts_with("https://"))
}

fn image_url_from(element: ElementRef<'_>) -> Option<String> {
    for attr in ["src", "data-src"] {
        if let Some(value) = element.value().attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }
    style_background_url(element.value().attr("style")?)
}

/// Pulls the URL out of a CSS `url(...)` function in an inline style.
fn style_background_url(style: &str) -> Option<String> {
    let re = Regex::new(r#"url\(['"]?([^'")]+)['"]?\)"#).expect("valid css url regex");
    re.captures(style)
        .map(|cap| cap[1].trim().to_owned())
        .filter(|u| !u.is_empty())
}

/// Takes the first match of each selector in order and joins their texts
/// with a space; `None` when nothing matched. Covers split-element fields
/// like Myntra's brand/name headers and Amazon's symbol/amount price.
fn select_concat(document: &Html, selector_strings: &[String]) -> Option<String> {
    let mut parts = Vec::new();
    for raw in selector_strings {
        let Some(selector) = parse_selector(raw) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(element);
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn meta_content(document: &Html, selector_string: &str) -> Option<String> {
    let selector = parse_selector(selector_string)?;
    let element = document.select(&selector).next()?;
    let content = element.value().attr("content")?.trim();
    (!content.is_empty()).then(|| content.to_owned())
}

fn first_text(document: &Html, selector_string: &str) -> Option<String> {
    let selector = parse_selector(selector_string)?;
    let element = document.select(&selector).next()?;
    let text = element_text(element);
    (!text.is_empty()).then_some(text)
}

/// Element text with whitespace runs collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scans raw page text for a `₹`/`Rs` marker adjacent to a digit run.
fn rupee_scan(raw_html: &str) -> Option<String> {
    let patterns = [
        r"₹\s*([\d,]+(?:\.\d+)?)",
        r"(?i)\bRs\.?\s*([\d,]+(?:\.\d+)?)",
        r"([\d,]+(?:\.\d+)?)\s*₹",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid rupee scan regex");
        if let Some(cap) = re.captures(raw_html) {
            return Some(cap[1].to_owned());
        }
    }
    None
}

/// Parses a configured CSS selector, logging and skipping invalid ones so a
/// bad rules entry degrades that one strategy instead of the pipeline.
pub(crate) fn parse_selector(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = raw, error = ?e, "invalid CSS selector; skipping strategy");
            None
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
