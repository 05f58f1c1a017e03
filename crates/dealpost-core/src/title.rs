//! Attribute derivation from scraped titles.
//!
//! Turns a raw scraped title into the pieces the templates need: a cleaned
//! brand-first title, an apparel judgment, a gender facet, and a quantity
//! phrase. Gender and quantity are derived from the raw title, before
//! cleaning, so keywords dropped by the word cap still count.

use regex::Regex;

use crate::record::Gender;
use crate::rules::GenderKeywords;

/// Substituted when cleaning leaves nothing usable.
pub const TITLE_FALLBACK: &str = "Product";

/// Word cap on the product-name remainder after the brand word.
const MAX_NAME_WORDS: usize = 7;

/// Cleans a raw title into the brand-first display form.
///
/// Non-ASCII characters are dropped, characters outside the
/// alphanumeric/space/hyphen/apostrophe/period set become spaces, whitespace
/// runs collapse, configured marketing filler words are removed as whole
/// words, the first remaining word is title-cased as the brand, and the
/// remainder is capped at [`MAX_NAME_WORDS`] words. Never returns an empty
/// string: an empty result falls back to [`TITLE_FALLBACK`].
#[must_use]
pub fn clean_title(raw: &str, filler_words: &[String]) -> String {
    let filtered: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '\'' | '.') {
                c
            } else {
                ' '
            }
        })
        .collect();

    let words: Vec<&str> = filtered
        .split_whitespace()
        .filter(|w| !filler_words.iter().any(|f| f.eq_ignore_ascii_case(w)))
        .collect();

    let Some((brand, rest)) = words.split_first() else {
        return TITLE_FALLBACK.to_owned();
    };

    let mut parts = vec![title_case_word(brand)];
    parts.extend(rest.iter().take(MAX_NAME_WORDS).map(|w| (*w).to_owned()));
    parts.join(" ")
}

/// Keyword-based judgment that an item is clothing, checked against both
/// the (lowercased) URL and title.
#[must_use]
pub fn is_apparel(url: &str, title: &str, apparel_keywords: &[String]) -> bool {
    let url = url.to_lowercase();
    let title = title.to_lowercase();
    apparel_keywords
        .iter()
        .any(|kw| url.contains(kw.as_str()) || title.contains(kw.as_str()))
}

/// Classifies the gender facet of an apparel title.
///
/// Scans for whole-word keyword matches, women before men so `"Women"` is
/// never claimed by the men group, and defaults to [`Gender::Unisex`]:
/// apparel is assumed to always carry a gender facet once classified as
/// apparel. Only call this for titles that passed [`is_apparel`].
#[must_use]
pub fn derive_gender(title: &str, keywords: &GenderKeywords) -> Gender {
    if has_keyword(title, &keywords.women) {
        Gender::Women
    } else if has_keyword(title, &keywords.men) {
        Gender::Men
    } else if has_keyword(title, &keywords.kids) {
        Gender::Kids
    } else {
        Gender::Unisex
    }
}

fn has_keyword(title: &str, words: &[String]) -> bool {
    !words.is_empty() && keyword_regex(words).is_match(title)
}

/// Extracts at most one quantity phrase from a title; first match wins.
///
/// `pack of N` / `set of N` and counted pieces normalize to `"Pack of N"`;
/// a bare count with a measure unit normalizes to `"N <Unit>"` with the
/// unit title-cased (`"300ml"` → `"300 Ml"`).
#[must_use]
pub fn extract_quantity(title: &str) -> Option<String> {
    let pack_of = Regex::new(r"(?i)\b(?:pack|set)\s+of\s+(\d+)\b").expect("valid pack-of regex");
    if let Some(cap) = pack_of.captures(title) {
        return Some(format!("Pack of {}", &cap[1]));
    }

    let pieces = Regex::new(r"(?i)\b(\d+)\s*(?:pcs|pieces?|items?)\b").expect("valid pieces regex");
    if let Some(cap) = pieces.captures(title) {
        return Some(format!("Pack of {}", &cap[1]));
    }

    let unit = Regex::new(r"(?i)\b(\d+)\s*(ml|gm|kg|ltr|pack|set|piece)\b").expect("valid unit regex");
    if let Some(cap) = unit.captures(title) {
        return Some(format!("{} {}", &cap[1], title_case_word(&cap[2])));
    }

    None
}

/// Builds a case-insensitive whole-word alternation over `words`.
fn keyword_regex(words: &[String]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid keyword regex")
}

/// Uppercases the first character and lowercases the rest.
fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_filler() -> Vec<String> {
        crate::rules::RulesFile::builtin().filler_words
    }

    fn builtin_gender() -> GenderKeywords {
        crate::rules::RulesFile::builtin().gender_keywords
    }

    // -----------------------------------------------------------------------
    // clean_title
    // -----------------------------------------------------------------------

    #[test]
    fn clean_title_title_cases_brand() {
        assert_eq!(
            clean_title("puma running shoes", &builtin_filler()),
            "Puma running shoes"
        );
    }

    #[test]
    fn clean_title_strips_disallowed_characters() {
        assert_eq!(
            clean_title("Sony® WH-1000XM4 (Black)!", &builtin_filler()),
            "Sony WH-1000XM4 Black"
        );
    }

    #[test]
    fn clean_title_collapses_whitespace() {
        assert_eq!(
            clean_title("Boat   Airdopes\t141", &builtin_filler()),
            "Boat Airdopes 141"
        );
    }

    #[test]
    fn clean_title_removes_filler_words() {
        assert_eq!(
            clean_title("Best Deal Nike Air Zoom Sale", &builtin_filler()),
            "Nike Air Zoom"
        );
    }

    #[test]
    fn clean_title_caps_name_at_seven_words_after_brand() {
        let cleaned = clean_title(
            "Brandx one two three four five six seven eight nine",
            &builtin_filler(),
        );
        assert_eq!(cleaned, "Brandx one two three four five six seven");
    }

    #[test]
    fn clean_title_empty_input_falls_back() {
        assert_eq!(clean_title("", &builtin_filler()), TITLE_FALLBACK);
    }

    #[test]
    fn clean_title_only_symbols_falls_back() {
        assert_eq!(clean_title("!!! ©©© !!!", &builtin_filler()), TITLE_FALLBACK);
    }

    #[test]
    fn clean_title_keeps_hyphen_apostrophe_period() {
        assert_eq!(
            clean_title("Levi's 511 Slim-Fit 2.0", &builtin_filler()),
            "Levi's 511 Slim-Fit 2.0"
        );
    }

    // -----------------------------------------------------------------------
    // is_apparel
    // -----------------------------------------------------------------------

    #[test]
    fn is_apparel_from_url_keyword() {
        let rules = crate::rules::RulesFile::builtin();
        assert!(is_apparel(
            "https://www.myntra.com/jeans/roadster/123",
            "Roadster Slim Fit",
            &rules.apparel_keywords
        ));
    }

    #[test]
    fn is_apparel_from_title_keyword() {
        let rules = crate::rules::RulesFile::builtin();
        assert!(is_apparel(
            "https://example.com/p/1",
            "Cotton Kurti for summer",
            &rules.apparel_keywords
        ));
    }

    #[test]
    fn is_apparel_false_for_electronics() {
        let rules = crate::rules::RulesFile::builtin();
        assert!(!is_apparel(
            "https://www.amazon.in/dp/B0ABCDEF",
            "Sony Headphones",
            &rules.apparel_keywords
        ));
    }

    // -----------------------------------------------------------------------
    // derive_gender
    // -----------------------------------------------------------------------

    #[test]
    fn derive_gender_women_any_case() {
        assert_eq!(
            derive_gender("WOMEN Printed Kurti", &builtin_gender()),
            Gender::Women
        );
    }

    #[test]
    fn derive_gender_women_wins_over_men_substring() {
        // "Women" contains "men" — the word boundary and scan order must
        // keep it classified as Women.
        assert_eq!(
            derive_gender("Women Running Shoes", &builtin_gender()),
            Gender::Women
        );
    }

    #[test]
    fn derive_gender_men() {
        assert_eq!(
            derive_gender("Men Solid T-Shirt", &builtin_gender()),
            Gender::Men
        );
    }

    #[test]
    fn derive_gender_kids() {
        assert_eq!(
            derive_gender("Kids Cartoon Hoodie", &builtin_gender()),
            Gender::Kids
        );
    }

    #[test]
    fn derive_gender_defaults_to_unisex() {
        assert_eq!(
            derive_gender("Cotton Kurti", &builtin_gender()),
            Gender::Unisex
        );
    }

    // -----------------------------------------------------------------------
    // extract_quantity
    // -----------------------------------------------------------------------

    #[test]
    fn quantity_pack_of_n() {
        assert_eq!(
            extract_quantity("Pack of 3 Cotton Towels").as_deref(),
            Some("Pack of 3")
        );
    }

    #[test]
    fn quantity_set_of_n() {
        assert_eq!(
            extract_quantity("Set of 6 steel glasses").as_deref(),
            Some("Pack of 6")
        );
    }

    #[test]
    fn quantity_counted_pieces() {
        assert_eq!(
            extract_quantity("12 pcs makeup brushes").as_deref(),
            Some("Pack of 12")
        );
    }

    #[test]
    fn quantity_measure_unit_title_cased() {
        assert_eq!(extract_quantity("300ml Shampoo").as_deref(), Some("300 Ml"));
    }

    #[test]
    fn quantity_measure_unit_with_space() {
        assert_eq!(
            extract_quantity("Dettol 500 ml handwash").as_deref(),
            Some("500 Ml")
        );
    }

    #[test]
    fn quantity_first_match_wins() {
        assert_eq!(
            extract_quantity("Pack of 2 bottles 500ml each").as_deref(),
            Some("Pack of 2")
        );
    }

    #[test]
    fn quantity_absent_returns_none() {
        assert!(extract_quantity("Cotton Kurti").is_none());
    }
}
