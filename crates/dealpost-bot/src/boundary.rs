//! Collaborator contracts at the transport edge.
//!
//! OCR and screenshot capture are thin I/O wrappers provided by the host
//! process; the pipeline only needs their inputs and outputs. Both are
//! best-effort: failure is an empty result, never an error.

use std::future::Future;

/// Image → text, used only when a message carries a photo and no URL was
/// found in its text.
pub trait OcrEngine {
    /// Best-effort text extraction; returns an empty string on failure.
    fn extract_text(&self, image: &[u8]) -> impl Future<Output = String> + Send;
}

/// Mobile-viewport page capture, optionally preferred over the scraped
/// product image in photo replies.
pub trait Screenshotter {
    /// Best-effort capture; returns `None` on failure.
    fn capture(&self, url: &str) -> impl Future<Output = Option<Vec<u8>>> + Send;
}

/// Stand-in for contexts without an OCR collaborator (e.g. the CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcr;

impl OcrEngine for NoOcr {
    async fn extract_text(&self, _image: &[u8]) -> String {
        String::new()
    }
}

/// Stand-in for contexts without a screenshot collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScreenshot;

impl Screenshotter for NoScreenshot {
    async fn capture(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }
}
