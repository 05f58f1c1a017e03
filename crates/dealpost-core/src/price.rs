//! Price normalization from scraped strings to canonical integer strings.

/// Sentinel substituted when no usable price could be parsed. Callers must
/// never see a parse error; this string is the failure mode.
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Converts a raw price string into a canonical whole-rupee string.
///
/// Takes the first digit run (with embedded `.`/`,` separators), so stray
/// punctuation from currency markers like `"Rs."` never pollutes the value.
/// With both separators present, `,` is a thousands separator. With only
/// `,` present, it is a thousands separator when the final comma-group has
/// exactly three digits (covers Western `1,234` and Indian `1,23,456`
/// grouping) and a decimal comma otherwise (`12,50`). The result is parsed
/// as a float and rendered rounded to whole currency units; fractional
/// paise are not preserved.
///
/// Unparseable or empty input yields [`PRICE_UNAVAILABLE`].
#[must_use]
pub fn normalize_price(raw: &str) -> String {
    let Some(kept) = first_number_run(raw) else {
        return PRICE_UNAVAILABLE.to_owned();
    };

    let normalized = if kept.contains(',') && kept.contains('.') {
        kept.replace(',', "")
    } else if kept.contains(',') {
        if comma_is_thousands(kept) {
            kept.replace(',', "")
        } else {
            kept.replace(',', ".")
        }
    } else {
        kept.to_owned()
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {
            #[allow(clippy::cast_possible_truncation)]
            let whole = value.round() as i64;
            whole.to_string()
        }
        _ => PRICE_UNAVAILABLE.to_owned(),
    }
}

/// Whether a canonical price is usable for display. Both the sentinel and
/// `"0"` mean "no usable price" — the two miss values produced by different
/// extraction strategies.
#[must_use]
pub fn has_usable_price(price: &str) -> bool {
    price != PRICE_UNAVAILABLE && price != "0"
}

/// Returns the first maximal run of digits and embedded separators,
/// trimmed of trailing separators: `"Rs. 1,234.00/-"` → `"1,234.00"`.
fn first_number_run(raw: &str) -> Option<&str> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let rest = &raw[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '.' | ','))
        .unwrap_or(rest.len());
    Some(rest[..end].trim_end_matches(['.', ',']))
}

/// A lone comma is a thousands separator when the digits after the final
/// comma form a group of exactly three.
fn comma_is_thousands(s: &str) -> bool {
    s.rsplit(',')
        .next()
        .is_some_and(|last| last.len() == 3 && last.bytes().all(|b| b.is_ascii_digit()))
}
