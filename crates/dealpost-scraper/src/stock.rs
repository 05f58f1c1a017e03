//! Out-of-stock detection.
//!
//! Two signals, either of which is positive: a stock/availability/status
//! element whose text carries an out-of-stock phrase, or an element whose
//! class itself is an out-of-stock marker. Scanning is scoped to such
//! elements rather than the whole page text so a "sold out" in a
//! recommendation rail does not poison the record. Absence of all signals
//! means in stock; the answer is never re-checked.

use scraper::{Html, Selector};

const STOCK_PHRASES: [&str; 6] = [
    "out of stock",
    "sold out",
    "currently unavailable",
    "not available",
    "not in stock",
    "unavailable",
];

/// Class fragments marking elements that talk about availability.
const STOCK_CLASS_KEYWORDS: [&str; 3] = ["stock", "availability", "status"];

/// Class fragments that are themselves a positive out-of-stock signal.
const OOS_CLASS_MARKERS: [&str; 4] = ["out-of-stock", "outofstock", "sold-out", "soldout"];

pub(crate) fn out_of_stock(document: &Html) -> bool {
    let any_class = Selector::parse("[class]").expect("valid class selector");

    for element in document.select(&any_class) {
        let class = element
            .value()
            .attr("class")
            .unwrap_or_default()
            .to_lowercase();

        if OOS_CLASS_MARKERS.iter().any(|m| class.contains(m)) {
            return true;
        }

        if STOCK_CLASS_KEYWORDS.iter().any(|k| class.contains(k)) {
            let text = element.text().collect::<String>().to_lowercase();
            if STOCK_PHRASES.iter().any(|p| text.contains(p)) {
                return true;
            }
        }
    }

    false
}
