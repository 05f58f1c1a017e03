//! The per-URL processing pipeline.
//!
//! Data flows strictly left to right: normalize → detect → fetch → extract
//! → derive + price-normalize → format. No stage retains state across
//! invocations and each URL is processed independently, so the pipeline is
//! idempotent per URL.

use dealpost_core::format::format_post;
use dealpost_core::price::{normalize_price, PRICE_UNAVAILABLE};
use dealpost_core::record::{Platform, ProductRecord};
use dealpost_core::rules::RulesFile;
use dealpost_core::title::{clean_title, derive_gender, extract_quantity, is_apparel};
use dealpost_scraper::{extract_fields, normalize_url, Extracted, PageClient};

/// What one URL produced. Only `Post` carries a finished record; the other
/// variants short-circuit before formatting and map to fixed reply strings
/// at the handler.
#[derive(Debug, Clone)]
pub enum PostOutcome {
    /// A complete record and its rendered reply text.
    Post {
        record: ProductRecord,
        text: String,
    },
    /// The item is out of stock; a stock warning replaces the product post.
    OutOfStock { url: String },
    /// The host matched no configured platform; all further processing is
    /// suppressed.
    Unsupported { url: String },
    /// The page fetch failed; no partial record is ever produced.
    Failed { url: String },
}

/// Runs the full pipeline for one raw URL.
///
/// `pin` is the 6-digit code already resolved from the inbound message (or
/// the configured default). Fetch failures, unsupported hosts, and
/// out-of-stock items are outcomes, not errors — the caller never sees a
/// `Result` here.
pub async fn process_url(
    client: &PageClient,
    rules: &RulesFile,
    raw_url: &str,
    pin: &str,
    max_redirect_hops: usize,
) -> PostOutcome {
    let url = normalize_url(client, rules, raw_url, max_redirect_hops).await;

    let Some(platform) = rules.detect_platform(&url) else {
        tracing::info!(url = %url, "unsupported host; rejecting");
        return PostOutcome::Unsupported { url };
    };

    let html = match client.fetch_page(&url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(url = %url, platform = %platform, stage = "fetch", error = %e, "page fetch failed");
            return PostOutcome::Failed { url };
        }
    };

    let extracted = extract_fields(&html, platform, rules);
    if extracted.out_of_stock {
        tracing::info!(url = %url, platform = %platform, "item is out of stock; skipping post");
        return PostOutcome::OutOfStock { url };
    }

    let record = build_record(platform, url, pin, rules, extracted);
    let text = format_post(&record);
    PostOutcome::Post { record, text }
}

/// Assembles the finished record from raw extracted fields: title cleaning,
/// apparel/gender judgment, quantity extraction, price normalization.
/// Gender and quantity derive from the raw title so keywords beyond the
/// display word cap still count.
fn build_record(
    platform: Platform,
    url: String,
    pin: &str,
    rules: &RulesFile,
    extracted: Extracted,
) -> ProductRecord {
    let scan_title = extracted.raw_title.clone().unwrap_or_default();

    let title = clean_title(&scan_title, &rules.filler_words);
    let gender = is_apparel(&url, &scan_title, &rules.apparel_keywords)
        .then(|| derive_gender(&scan_title, &rules.gender_keywords));
    let quantity = extract_quantity(&scan_title);
    let price = extracted
        .raw_price
        .as_deref()
        .map_or_else(|| PRICE_UNAVAILABLE.to_owned(), normalize_price);

    ProductRecord {
        platform,
        url,
        raw_title: extracted.raw_title,
        title,
        raw_price: extracted.raw_price,
        price,
        image_url: extracted.image_url,
        out_of_stock: extracted.out_of_stock,
        gender,
        quantity,
        sizes: extracted.sizes,
        pin: pin.to_owned(),
    }
}
