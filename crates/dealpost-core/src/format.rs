//! Reply formatting: fixed textual templates keyed on platform and the
//! apparel judgment. Pure string substitution — once a branch is chosen
//! there is no conditional re-entry.

use crate::record::{Platform, ProductRecord};

/// Fixed footer appended to every reply template.
pub const FOOTER: &str = "@reviewcheckk";

/// Rendered in the Meesho size line when no sizes were extracted.
pub const SIZES_ALL: &str = "All";

/// Renders the reply text for a finished record.
///
/// Template selection, in priority order:
/// 1. Meesho — gender/quantity-first head plus size and pin lines.
/// 2. Apparel (a gender facet is present, or the platform is a
///    fashion-first marketplace) — title `@price`.
/// 3. Everything else — title `from @price`.
///
/// The record must be complete: `title` and `price` are always rendered
/// and must never be empty (the extractor guarantees placeholders).
#[must_use]
pub fn format_post(record: &ProductRecord) -> String {
    match record.platform {
        Platform::Meesho => format_meesho(record),
        _ if record.gender.is_some() || record.platform.is_fashion_first() => format!(
            "{} @{} rs\n{}\n\n{FOOTER}",
            record.title, record.price, record.url
        ),
        _ => format!(
            "{} from @{} rs\n{}\n\n{FOOTER}",
            record.title, record.price, record.url
        ),
    }
}

/// Meesho template. The gender and quantity segments are omitted entirely
/// when absent — never rendered as empty tokens.
fn format_meesho(record: &ProductRecord) -> String {
    let mut head_parts: Vec<&str> = Vec::new();
    if let Some(gender) = record.gender {
        head_parts.push(gender.as_str());
    }
    if let Some(quantity) = record.quantity.as_deref() {
        head_parts.push(quantity);
    }
    head_parts.push(&record.title);
    let head = head_parts.join(" ");

    let sizes = record.sizes.as_deref().unwrap_or(SIZES_ALL);
    format!(
        "{head} @{} rs\n{}\n\nSize - {sizes}\nPin - {}\n\n{FOOTER}",
        record.price, record.url, record.pin
    )
}
