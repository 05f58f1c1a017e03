//! Message-level handling: URL and pin scanning, the OCR fallback, and
//! reply selection.
//!
//! URLs within one message process sequentially; a slow or failing remote
//! host degrades that one URL, not the rest of the message. User-visible
//! text always comes from the small fixed set of strings below — never a
//! raw error.

use dealpost_core::message::{extract_pin, extract_urls};
use dealpost_core::record::ProductRecord;
use dealpost_core::rules::RulesFile;
use dealpost_core::AppConfig;
use dealpost_scraper::PageClient;

use crate::boundary::{OcrEngine, Screenshotter};
use crate::pipeline::{process_url, PostOutcome};

pub const MSG_UNSUPPORTED: &str = "❌ Unsupported or invalid product link.";
pub const MSG_EXTRACTION_FAILED: &str = "❌ Unable to extract product info.";
pub const MSG_OUT_OF_STOCK: &str = "⚠️ Out of stock - not posting this one.";

/// Cap on the OCR excerpt echoed back when no link was found in it.
const OCR_EXCERPT_CHARS: usize = 200;

/// One inbound message: text or caption, plus an optional photo.
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    pub text: String,
    pub photo: Option<Vec<u8>>,
}

/// One outbound reply for the transport layer to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// The formatted post sent as the caption of an image.
    Photo { image: Vec<u8>, caption: String },
}

/// Processes one inbound message into zero or more replies.
///
/// When the text carries no URL but a photo is attached, the OCR
/// collaborator is consulted and its output rescanned for URLs. A message
/// with neither URLs nor usable OCR text produces no reply at all.
pub async fn handle_message<O, S>(
    client: &PageClient,
    rules: &RulesFile,
    config: &AppConfig,
    ocr: &O,
    screenshotter: &S,
    message: &InboundMessage,
) -> Vec<Reply>
where
    O: OcrEngine,
    S: Screenshotter,
{
    let mut urls = extract_urls(&message.text);
    let pin = extract_pin(&message.text).unwrap_or_else(|| rules.default_pin.clone());

    let mut ocr_text = String::new();
    if urls.is_empty() {
        if let Some(photo) = &message.photo {
            ocr_text = ocr.extract_text(photo).await;
            let found = extract_urls(&ocr_text);
            if !found.is_empty() {
                tracing::info!(count = found.len(), "found URLs via OCR");
            }
            urls.extend(found);
        }
    }

    if urls.is_empty() {
        if ocr_text.trim().is_empty() {
            return Vec::new();
        }
        let excerpt: String = ocr_text.trim().chars().take(OCR_EXCERPT_CHARS).collect();
        return vec![Reply::Text(format!(
            "OCR extracted text:\n{excerpt}\n(No valid product link found)"
        ))];
    }

    let mut replies = Vec::with_capacity(urls.len());
    for url in &urls {
        let outcome = process_url(client, rules, url, &pin, config.max_redirect_hops).await;
        let reply = match outcome {
            PostOutcome::Unsupported { .. } => Reply::Text(MSG_UNSUPPORTED.to_owned()),
            PostOutcome::Failed { .. } => Reply::Text(MSG_EXTRACTION_FAILED.to_owned()),
            PostOutcome::OutOfStock { .. } => Reply::Text(MSG_OUT_OF_STOCK.to_owned()),
            PostOutcome::Post { record, text } => {
                post_reply(client, config, screenshotter, &record, text).await
            }
        };
        replies.push(reply);
    }
    replies
}

/// Picks the reply shape for a finished post: a screenshot caption when
/// preferred and available, else the scraped product image as caption,
/// else plain text. Image failures degrade to text — the post always goes
/// out.
async fn post_reply<S: Screenshotter>(
    client: &PageClient,
    config: &AppConfig,
    screenshotter: &S,
    record: &ProductRecord,
    text: String,
) -> Reply {
    if config.prefer_screenshot {
        if let Some(image) = screenshotter.capture(&record.url).await {
            return Reply::Photo {
                image,
                caption: text,
            };
        }
    }

    if let Some(image_url) = &record.image_url {
        match client.fetch_image(image_url).await {
            Ok(image) => {
                return Reply::Photo {
                    image,
                    caption: text,
                }
            }
            Err(e) => {
                tracing::warn!(url = %record.url, image_url = %image_url, error = %e, "image fetch failed; sending text-only reply");
            }
        }
    }

    Reply::Text(text)
}
