//! End-to-end tests for `handle_message` against a live mock server.
//!
//! Each test repoints one platform's domain at the wiremock host so the
//! pipeline runs its real detection, fetch, extraction, and formatting
//! stages with no real network traffic.

use std::path::PathBuf;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealpost_bot::{
    handle_message, InboundMessage, NoOcr, NoScreenshot, OcrEngine, Reply, Screenshotter,
    MSG_EXTRACTION_FAILED, MSG_OUT_OF_STOCK, MSG_UNSUPPORTED,
};
use dealpost_core::record::Platform;
use dealpost_core::rules::RulesFile;
use dealpost_core::AppConfig;
use dealpost_scraper::PageClient;

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        rules_path: PathBuf::from("./config/platforms.yaml"),
        fetch_timeout_secs: 5,
        head_timeout_secs: 5,
        max_redirect_hops: 5,
        user_agent: "dealpost-test/0.1".to_string(),
        prefer_screenshot: false,
    }
}

fn test_client() -> PageClient {
    PageClient::new(5, 5, "dealpost-test/0.1").expect("failed to build test PageClient")
}

/// Builtin rules with `platform`'s domain repointed at the mock host, so
/// URLs like `http://127.0.0.1:PORT/...` detect as that platform.
fn rules_for(platform: Platform) -> RulesFile {
    let mut rules = RulesFile::builtin();
    let entry = rules
        .platforms
        .iter_mut()
        .find(|p| p.name == platform)
        .expect("builtin rules carry the requested platform");
    entry.domain = "127.0.0.1".to_string();
    rules
}

fn text_message(text: &str) -> InboundMessage {
    InboundMessage {
        text: text.to_string(),
        photo: None,
    }
}

/// OCR stub returning a canned string.
struct FakeOcr(String);

impl OcrEngine for FakeOcr {
    async fn extract_text(&self, _image: &[u8]) -> String {
        self.0.clone()
    }
}

/// Screenshot stub returning canned bytes.
struct FakeScreenshot(Vec<u8>);

impl Screenshotter for FakeScreenshot {
    async fn capture(&self, _url: &str) -> Option<Vec<u8>> {
        Some(self.0.clone())
    }
}

const GADGET_PAGE: &str = r#"<html><head>
<script type="application/ld+json">
{"@type": "Product", "name": "Sony Headphones", "offers": {"price": "2999"}}
</script>
</head><body></body></html>"#;

const KURTI_PAGE: &str = r#"<html><body>
<h1>Anubhutee Women Ethnic Kurti</h1>
<span data-testid="price">₹449</span>
<div class="size-chip">S</div><div class="size-chip">M</div>
</body></html>"#;

// ---------------------------------------------------------------------------
// reply templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_apparel_post_uses_from_template() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GADGET_PAGE))
        .mount(&server)
        .await;

    let url = format!("{}/dp/B0A", server.uri());
    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&url),
    )
    .await;

    assert_eq!(
        replies,
        vec![Reply::Text(format!(
            "Sony Headphones from @2999 rs\n{url}\n\n@reviewcheckk"
        ))]
    );
}

#[tokio::test]
async fn meesho_post_carries_gender_sizes_and_pin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/kurti"))
        .respond_with(ResponseTemplate::new(200).set_body_string(KURTI_PAGE))
        .mount(&server)
        .await;

    let url = format!("{}/p/kurti", server.uri());
    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Meesho),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&format!("{url} pin 560034")),
    )
    .await;

    let Reply::Text(text) = &replies[0] else {
        panic!("expected a text reply, got: {replies:?}");
    };
    assert!(text.starts_with("Women "), "gender-first head: {text}");
    assert!(text.contains("@449 rs\n"), "normalized price: {text}");
    assert!(text.contains("\nSize - S, M\n"), "extracted sizes: {text}");
    assert!(text.contains("\nPin - 560034\n"), "message pin wins: {text}");
    assert!(text.ends_with("@reviewcheckk"));
}

// ---------------------------------------------------------------------------
// failure replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_host_is_rejected_without_fetch() {
    // No server mounted: an unsupported host must short-circuit before any
    // network call.
    let replies = handle_message(
        &test_client(),
        &RulesFile::builtin(),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message("https://shop.example.com/p/1"),
    )
    .await;

    assert_eq!(replies, vec![Reply::Text(MSG_UNSUPPORTED.to_owned())]);
}

#[tokio::test]
async fn fetch_failure_yields_extraction_failed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&format!("{}/dp/B0A", server.uri())),
    )
    .await;

    assert_eq!(replies, vec![Reply::Text(MSG_EXTRACTION_FAILED.to_owned())]);
}

#[tokio::test]
async fn out_of_stock_item_never_reaches_the_formatter() {
    let server = MockServer::start().await;
    let page = r#"<html><body>
    <h1>Popular Gadget</h1>
    <div class="availability">Currently unavailable.</div>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&format!("{}/dp/B0A", server.uri())),
    )
    .await;

    assert_eq!(replies, vec![Reply::Text(MSG_OUT_OF_STOCK.to_owned())]);
}

#[tokio::test]
async fn one_bad_url_does_not_stall_the_next() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GADGET_PAGE))
        .mount(&server)
        .await;

    let text = format!(
        "https://shop.example.com/p/1 and {}/dp/B0A",
        server.uri()
    );
    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&text),
    )
    .await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], Reply::Text(MSG_UNSUPPORTED.to_owned()));
    assert!(matches!(&replies[1], Reply::Text(t) if t.contains("Sony Headphones")));
}

// ---------------------------------------------------------------------------
// OCR fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photo_with_url_in_ocr_text_is_processed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GADGET_PAGE))
        .mount(&server)
        .await;

    let ocr = FakeOcr(format!("screenshot says {}/dp/B0A", server.uri()));
    let message = InboundMessage {
        text: String::new(),
        photo: Some(vec![0xFF, 0xD8]),
    };
    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &ocr,
        &NoScreenshot,
        &message,
    )
    .await;

    assert!(matches!(&replies[0], Reply::Text(t) if t.contains("Sony Headphones")));
}

#[tokio::test]
async fn photo_with_linkless_ocr_text_echoes_excerpt() {
    let ocr = FakeOcr("Some product label, 50% off".to_string());
    let message = InboundMessage {
        text: String::new(),
        photo: Some(vec![0xFF, 0xD8]),
    };
    let replies = handle_message(
        &test_client(),
        &RulesFile::builtin(),
        &test_config(),
        &ocr,
        &NoScreenshot,
        &message,
    )
    .await;

    assert_eq!(replies.len(), 1);
    assert!(
        matches!(&replies[0], Reply::Text(t) if t.contains("Some product label")),
        "expected OCR excerpt, got: {replies:?}"
    );
}

#[tokio::test]
async fn message_without_urls_or_photo_is_ignored() {
    let replies = handle_message(
        &test_client(),
        &RulesFile::builtin(),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message("hello there"),
    )
    .await;

    assert!(replies.is_empty());
}

// ---------------------------------------------------------------------------
// photo replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolved_image_becomes_caption_reply() {
    let server = MockServer::start().await;
    let page = format!(
        r#"<html><head>
        <script type="application/ld+json">
        {{"@type": "Product", "name": "Sony Headphones", "offers": {{"price": "2999"}}}}
        </script>
        </head><body><img id="landingImage" src="{}/img/1.jpg"></body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/1.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]),
        )
        .mount(&server)
        .await;

    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&format!("{}/dp/B0A", server.uri())),
    )
    .await;

    let Reply::Photo { image, caption } = &replies[0] else {
        panic!("expected a photo reply, got: {replies:?}");
    };
    assert_eq!(image, &vec![0xFF, 0xD8, 0xFF]);
    assert!(caption.contains("Sony Headphones"));
}

#[tokio::test]
async fn failed_image_fetch_degrades_to_text_reply() {
    let server = MockServer::start().await;
    let page = format!(
        r#"<html><head>
        <script type="application/ld+json">
        {{"@type": "Product", "name": "Sony Headphones", "offers": {{"price": "2999"}}}}
        </script>
        </head><body><img id="landingImage" src="{}/img/gone.jpg"></body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &test_config(),
        &NoOcr,
        &NoScreenshot,
        &text_message(&format!("{}/dp/B0A", server.uri())),
    )
    .await;

    assert!(
        matches!(&replies[0], Reply::Text(t) if t.contains("Sony Headphones")),
        "expected text degradation, got: {replies:?}"
    );
}

#[tokio::test]
async fn screenshot_preferred_over_product_image_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GADGET_PAGE))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.prefer_screenshot = true;
    let screenshotter = FakeScreenshot(vec![0x89, 0x50]);

    let replies = handle_message(
        &test_client(),
        &rules_for(Platform::Amazon),
        &config,
        &NoOcr,
        &screenshotter,
        &text_message(&format!("{}/dp/B0A", server.uri())),
    )
    .await;

    let Reply::Photo { image, .. } = &replies[0] else {
        panic!("expected a screenshot photo reply, got: {replies:?}");
    };
    assert_eq!(image, &vec![0x89, 0x50]);
}
