use serde::{Deserialize, Serialize};

/// A supported e-commerce platform, identified by a domain substring of a
/// URL's host (see [`crate::rules::RulesFile::detect_platform`]).
///
/// `Generic` marks a host that should still be scraped with fallback-only
/// extraction; `Unsupported` marks a host the caller must reject outright.
/// Which of the two applies to an unmatched host is decided at the call
/// site, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    Flipkart,
    Meesho,
    Myntra,
    Ajio,
    Snapdeal,
    Wishlink,
    Generic,
    Unsupported,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
            Platform::Meesho => "meesho",
            Platform::Myntra => "myntra",
            Platform::Ajio => "ajio",
            Platform::Snapdeal => "snapdeal",
            Platform::Wishlink => "wishlink",
            Platform::Generic => "generic",
            Platform::Unsupported => "unsupported",
        }
    }

    /// Fashion-first marketplaces where listings are assumed to be apparel
    /// even when the title carries no apparel keyword.
    #[must_use]
    pub fn is_fashion_first(self) -> bool {
        matches!(self, Platform::Myntra | Platform::Ajio)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender facet of an apparel item, derived from its title.
///
/// Only present on records judged to be apparel; apparel with no gender
/// keyword in the title defaults to `Unisex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Kids,
    Unisex,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Kids => "Kids",
            Gender::Unisex => "Unisex",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pipeline's central value object, produced once per URL.
///
/// Fields are filled incrementally by the extractor and deriver stages and
/// the record is frozen before formatting. `title` and `price` are always
/// non-empty in a finished record: missing data is substituted with the
/// `"Product"` fallback and the price-unavailable sentinel so the formatter
/// never sees an absent field it needs to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Computed once from the canonical URL's host; never changes.
    pub platform: Platform,
    /// Canonical (post-normalization) product URL. This is what replies embed.
    pub url: String,
    /// Title exactly as scraped, before cleaning.
    pub raw_title: Option<String>,
    /// Cleaned brand-first title; never empty.
    pub title: String,
    /// Price string exactly as scraped, currency symbols and all.
    pub raw_price: Option<String>,
    /// Canonical integer price string, or [`crate::price::PRICE_UNAVAILABLE`].
    pub price: String,
    /// Absent when no image was located or it failed validation.
    pub image_url: Option<String>,
    /// Defaults to `false` when indeterminate; never re-checked.
    pub out_of_stock: bool,
    /// Present only when the item is judged to be apparel.
    pub gender: Option<Gender>,
    /// `"N <Unit>"` or `"Pack of N"`, at most one phrase per title.
    pub quantity: Option<String>,
    /// Comma-joined size tokens or `"All"`; populated for Meesho only.
    pub sizes: Option<String>,
    /// 6-digit pin code from the inbound message, else the configured default.
    pub pin: String,
}
