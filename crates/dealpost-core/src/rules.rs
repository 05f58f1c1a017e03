//! The externally supplied rule set driving the pipeline.
//!
//! Everything platform-shaped lives here as data, not logic: the platform →
//! domain mapping (ordered, first match wins), per-platform query-parameter
//! allow-lists and CSS selector sets, shortener domains, apparel and gender
//! keyword groups, marketing filler words, and the default pin code. Loaded
//! once at startup from a YAML file and passed by reference into the
//! pipeline — no ambient globals.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::record::Platform;

/// CSS selectors for one platform's product page.
///
/// `title` and `price` are ordered lists: the first match of each selector
/// is taken and the texts are concatenated, which covers platforms that
/// split brand/name (Myntra) or currency-symbol/amount (Amazon) across
/// elements. An empty set means fallback-only extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorSet {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub price: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Size-chip candidates; only consulted for Meesho.
    #[serde(default)]
    pub sizes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub name: Platform,
    /// Domain substring matched against a lowercased URL host, so
    /// `amazon.in` also matches `www.amazon.in` and `smile.amazon.in`.
    pub domain: String,
    /// Product-identifying query parameters to retain during URL cleaning,
    /// matched case-insensitively. Everything else is stripped.
    #[serde(default)]
    pub keep_params: Vec<String>,
    #[serde(default)]
    pub selectors: SelectorSet,
}

/// Keyword groups for gender classification, scanned as whole words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderKeywords {
    pub women: Vec<String>,
    pub men: Vec<String>,
    pub kids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesFile {
    pub default_pin: String,
    pub shorteners: Vec<String>,
    /// Ordered: the first entry whose domain is contained in the host wins.
    pub platforms: Vec<PlatformEntry>,
    pub apparel_keywords: Vec<String>,
    pub gender_keywords: GenderKeywords,
    pub filler_words: Vec<String>,
}

impl RulesFile {
    /// The rule set shipped with the repository (`config/platforms.yaml`),
    /// parsed from an embedded copy. Used by tests and as a fallback when
    /// no rules file is deployed.
    #[must_use]
    pub fn builtin() -> Self {
        let rules: RulesFile = serde_yaml::from_str(include_str!("../../../config/platforms.yaml"))
            .expect("builtin platforms.yaml is valid");
        validate_rules(&rules).expect("builtin platforms.yaml passes validation");
        rules
    }

    /// Maps a URL's host to a platform, or `None` when no configured domain
    /// matches. Callers decide whether an unmatched host means
    /// [`Platform::Generic`] (scrape with fallbacks) or
    /// [`Platform::Unsupported`] (reject).
    #[must_use]
    pub fn detect_platform(&self, url: &str) -> Option<Platform> {
        let host = host_of(url).to_lowercase();
        self.platforms
            .iter()
            .find(|entry| host.contains(&entry.domain))
            .map(|entry| entry.name)
    }

    /// Query-parameter allow-list for the platform matching `host`, empty
    /// when the host matches no platform (a clean, tracker-free bare URL).
    #[must_use]
    pub fn keep_params_for_host(&self, host: &str) -> &[String] {
        let host = host.to_lowercase();
        match self
            .platforms
            .iter()
            .find(|entry| host.contains(&entry.domain))
        {
            Some(entry) => entry.keep_params.as_slice(),
            None => &[],
        }
    }

    #[must_use]
    pub fn is_shortener(&self, url: &str) -> bool {
        let host = host_of(url).to_lowercase();
        self.shorteners.iter().any(|s| host.contains(s))
    }

    /// The configured entry for `platform`, if any. `Generic` and
    /// `Unsupported` never have entries.
    #[must_use]
    pub fn platform_entry(&self, platform: Platform) -> Option<&PlatformEntry> {
        self.platforms.iter().find(|entry| entry.name == platform)
    }

    /// Selector set for `platform`; empty (fallback-only) when the platform
    /// has no entry or no selectors.
    #[must_use]
    pub fn selectors(&self, platform: Platform) -> Option<&SelectorSet> {
        self.platform_entry(platform).map(|entry| &entry.selectors)
    }
}

/// Extracts the host part of a URL without pulling in a URL parser: strips
/// the scheme, then takes everything up to the first `/`.
///
/// Falls back to the full input when no scheme is present, which keeps
/// domain containment checks working on bare hosts.
#[must_use]
pub fn host_of(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}

/// Load and validate the rule set from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_rules(path: &Path) -> Result<RulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let rules: RulesFile = serde_yaml::from_str(&content)?;
    validate_rules(&rules)?;

    Ok(rules)
}

fn validate_rules(rules: &RulesFile) -> Result<(), ConfigError> {
    if rules.default_pin.len() != 6 || !rules.default_pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "default_pin '{}' must be exactly 6 digits",
            rules.default_pin
        )));
    }

    if rules.platforms.is_empty() {
        return Err(ConfigError::Validation(
            "at least one platform must be configured".to_string(),
        ));
    }

    let mut seen = Vec::new();
    for entry in &rules.platforms {
        if matches!(entry.name, Platform::Generic | Platform::Unsupported) {
            return Err(ConfigError::Validation(format!(
                "'{}' is a reserved platform name and cannot be configured",
                entry.name
            )));
        }
        if entry.domain.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "platform '{}' has an empty domain",
                entry.name
            )));
        }
        if entry.domain != entry.domain.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "platform domain '{}' must be lowercase",
                entry.domain
            )));
        }
        if seen.contains(&entry.name) {
            return Err(ConfigError::Validation(format!(
                "duplicate platform entry: '{}'",
                entry.name
            )));
        }
        seen.push(entry.name);
    }

    if rules.shorteners.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "shortener domains must be non-empty".to_string(),
        ));
    }

    Ok(())
}
