use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::error::ScraperError;

/// HTTP client for product pages and images.
///
/// Carries two underlying clients: one for page/image GETs with a bounded
/// total timeout, and one with redirect-following disabled so shortener
/// expansion can read each hop's `Location` header manually. Both send a
/// browser-like header set; several platforms serve bot traffic an empty
/// shell otherwise.
pub struct PageClient {
    client: Client,
    head_client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeouts and user agent.
    ///
    /// `fetch_timeout_secs` bounds page and image GETs; `head_timeout_secs`
    /// bounds a single HEAD hop during shortener expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        fetch_timeout_secs: u64,
        head_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(fetch_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .default_headers(browser_headers())
            .build()?;

        let head_client = Client::builder()
            .timeout(Duration::from_secs(head_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .redirect(Policy::none())
            .user_agent(user_agent)
            .default_headers(browser_headers())
            .build()?;

        Ok(Self {
            client,
            head_client,
        })
    }

    /// Fetches a product page and returns its raw HTML.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::Http`] — timeout, connection or body-read failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetches an image and returns its bytes, validating the content type.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::NotAnImage`] — the response is not `image/*`.
    /// - [`ScraperError::Http`] — timeout, connection or body-read failure.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        if !content_type.starts_with("image/") {
            return Err(ScraperError::NotAnImage {
                url: url.to_owned(),
                content_type,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Issues a single non-following HEAD request and returns the raw
    /// `Location` header, if the server sent one.
    ///
    /// Status is deliberately not checked: a shortener answering 4xx/5xx
    /// without a `Location` simply ends the expansion loop.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on timeout or connection failure.
    pub(crate) async fn head_location(&self, url: &str) -> Result<Option<String>, ScraperError> {
        let response = self.head_client.head(url).send().await?;
        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned))
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-IN,en;q=0.9,hi;q=0.8"),
    );
    headers
}
