//! Shortened-URL expansion by manual redirect following.

use crate::client::PageClient;

/// Expands a shortened URL by following HTTP redirects up to `max_hops`.
///
/// Each hop is a HEAD request with redirect-following disabled; the next
/// URL is read from the `Location` header and resolved against the current
/// URL when relative. A hop that fails or returns no `Location` ends the
/// loop. Never fails to the caller: redirection failure degrades to the
/// best URL known so far.
pub async fn expand_short_url(client: &PageClient, url: &str, max_hops: usize) -> String {
    let mut current = url.to_owned();

    for hop in 0..max_hops {
        match client.head_location(&current).await {
            Ok(Some(location)) => {
                let next = resolve_location(&current, &location);
                tracing::debug!(hop, from = %current, to = %next, "followed shortener redirect");
                current = next;
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(url = %current, error = %e, "redirect hop failed; keeping best URL known");
                break;
            }
        }
    }

    current
}

/// Resolves a `Location` value against the URL that produced it. Absolute
/// locations pass through; relative ones are joined onto the base, and an
/// unjoinable pair falls back to the raw location.
fn resolve_location(base: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_owned();
    }
    match reqwest::Url::parse(base).and_then(|b| b.join(location)) {
        Ok(joined) => joined.to_string(),
        Err(_) => location.to_owned(),
    }
}
