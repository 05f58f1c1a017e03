//! Network and HTML side of the dealpost pipeline.
//!
//! Fetches product pages with a browser-like header set, expands shortened
//! URLs by reading redirect `Location` headers manually, strips
//! affiliate/tracking query parameters, and extracts product fields from
//! HTML through ordered per-field strategy chains (structured data → meta
//! tags → platform selectors → generic fallbacks).

pub mod client;
pub mod error;
pub mod extract;
mod jsonld;
pub mod normalize;
mod sizes;
mod stock;
pub mod unshorten;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract_fields, Extracted};
pub use normalize::{normalize_url, strip_tracking_params};
pub use unshorten::expand_short_url;
