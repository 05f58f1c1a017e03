//! Structured product data embedded as `application/ld+json` script blocks.
//!
//! Accepts a product node as either a single object or the first element
//! of an array, keyed on `@type == "Product"`. Malformed JSON or an
//! unexpected shape is never an error here — each script block is tried
//! independently and the caller falls through to its next strategy.

use scraper::{Html, Selector};
use serde_json::Value;

/// Product `name` from the first JSON-LD product node carrying one.
pub(crate) fn product_name(document: &Html) -> Option<String> {
    for value in script_values(document) {
        let Some(node) = product_node(&value) else {
            continue;
        };
        if let Some(name) = node.get("name").and_then(Value::as_str) {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_owned());
            }
        }
    }
    None
}

/// `offers.price` from the first JSON-LD product node carrying one,
/// coerced to an integer string. When `offers` is an array the first
/// element is taken.
pub(crate) fn offer_price(document: &Html) -> Option<String> {
    for value in script_values(document) {
        let Some(node) = product_node(&value) else {
            continue;
        };
        let Some(offers) = node.get("offers") else {
            continue;
        };
        let offer = match offers {
            Value::Array(items) => items.first(),
            other => Some(other),
        };
        let Some(price) = offer.and_then(|o| o.get("price")) else {
            continue;
        };
        if let Some(coerced) = coerce_price(price) {
            return Some(coerced);
        }
    }
    None
}

/// Parses every `application/ld+json` script block that holds valid JSON.
fn script_values(document: &Html) -> Vec<Value> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("valid json-ld script selector");
    document
        .select(&selector)
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            serde_json::from_str::<Value>(raw.trim()).ok()
        })
        .collect()
}

/// Resolves a parsed script value to a product node: the value itself when
/// it is a `@type == "Product"` object, or the first element of an array
/// when that element is one.
fn product_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => is_product_type(map.get("@type")?).then_some(value),
        Value::Array(items) => items.first().and_then(product_node),
        _ => None,
    }
}

fn is_product_type(node_type: &Value) -> bool {
    match node_type {
        Value::String(s) => s == "Product",
        Value::Array(values) => values.iter().filter_map(Value::as_str).any(|s| s == "Product"),
        _ => false,
    }
}

/// Coerces a JSON price (number or numeric string) to an integer string,
/// truncating fractional paise.
fn coerce_price(value: &Value) -> Option<String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = number as i64;
    Some(whole.to_string())
}
