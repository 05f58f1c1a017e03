//! URL canonicalization: shortener expansion plus tracking-parameter
//! stripping. Runs exactly once per URL, before fetch; the result is what
//! downstream consumers embed in replies.

use dealpost_core::rules::RulesFile;

use crate::client::PageClient;
use crate::unshorten::expand_short_url;

/// Produces the canonical form of a raw URL.
///
/// Shortened URLs are expanded first (bounded hop loop, graceful
/// degradation), then every query parameter not on the matched platform's
/// allow-list is stripped. Idempotent: normalizing a canonical URL yields
/// it unchanged.
pub async fn normalize_url(
    client: &PageClient,
    rules: &RulesFile,
    raw_url: &str,
    max_hops: usize,
) -> String {
    let expanded = if rules.is_shortener(raw_url) {
        expand_short_url(client, raw_url, max_hops).await
    } else {
        raw_url.to_owned()
    };
    strip_tracking_params(rules, &expanded)
}

/// Drops every query parameter not on the platform's allow-list, matched
/// case-insensitively, and reassembles scheme + host + path + retained
/// query. The `?` is omitted entirely when nothing survives; fragments are
/// always dropped. A host matching no platform retains no parameters.
///
/// Unparseable URLs pass through unchanged — cleaning degrades, it never
/// rejects.
#[must_use]
pub fn strip_tracking_params(rules: &RulesFile, url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        tracing::debug!(url, "URL not parseable; leaving as-is");
        return url.to_owned();
    };
    let Some(host) = parsed.host_str().map(str::to_owned) else {
        return url.to_owned();
    };

    let keep = rules.keep_params_for_host(&host);
    let retained: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| keep.iter().any(|p| p.eq_ignore_ascii_case(name)))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    parsed.set_fragment(None);
    parsed.set_query(None);
    if !retained.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (name, value) in &retained {
            pairs.append_pair(name, value);
        }
    }

    parsed.to_string()
}
