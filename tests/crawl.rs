//! End-to-end crawls against a mock quotes site.

use std::time::Duration;

use async_trait::async_trait;
use quotescrape::{Config, JsonLinesSink, Output, QuoteRecord, QuotesSpider, Response, Spider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_1: &str = include_str!("fixtures/page1.html");
const PAGE_10: &str = include_str!("fixtures/page10.html");

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Quote spider seeded with several urls.
struct MultiSeedSpider {
    start_urls: Vec<String>,
    inner: QuotesSpider,
}

#[async_trait]
impl Spider for MultiSeedSpider {
    type Item = QuoteRecord;

    fn name(&self) -> String {
        "multi-seed".to_owned()
    }

    fn start_urls(&self) -> Vec<String> {
        self.start_urls.clone()
    }

    async fn parse(&self, response: Response) -> quotescrape::Result<Output<QuoteRecord>> {
        self.inner.parse(response).await
    }
}

fn test_config() -> Config {
    Config {
        bot_name: "TestBot".to_owned(),
        timeout_secs: 5,
        ..Config::default()
    }
}

#[tokio::test]
async fn follows_next_links_until_exhausted() {
    let server = MockServer::start().await;
    // page1 links to /page/2/, which is the terminal page
    mount(&server, "/page/1", PAGE_1).await;
    mount(&server, "/page/2/", PAGE_10).await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/1", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert_eq!(items.len(), 12);
    assert_eq!(items[0].author.as_deref(), Some("Albert Einstein"));
    assert_eq!(items[11].author.as_deref(), Some("Jane Austen"));
    assert_eq!(engine.stats().total_crawled(), 2);
    assert_eq!(engine.stats().total_scraped(), 12);
    assert_eq!(engine.stats().total_failed(), 0);

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_owned()).collect();
    assert_eq!(paths, vec!["/page/1", "/page/2/"]);
}

#[tokio::test]
async fn self_referencing_next_link_terminates() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/page/1/",
        r#"<div class="quote"><span class="text">Again</span></div>
           <ul class="pager"><li class="next"><a href="/page/1/#again">Next</a></li></ul>"#,
    )
    .await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/1/", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn max_pages_bounds_the_crawl() {
    let server = MockServer::start().await;
    mount(&server, "/page/1", PAGE_1).await;
    mount(&server, "/page/2/", PAGE_10).await;

    let config = Config {
        max_pages: 1,
        ..test_config()
    };
    let spider = QuotesSpider::with_start_url(&format!("{}/page/1", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(config, spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(engine.stats().total_crawled(), 1);
}

#[tokio::test]
async fn failed_page_is_logged_and_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/1", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(engine.stats().total_crawled(), 0);
    assert_eq!(engine.stats().total_failed(), 1);
}

#[tokio::test]
async fn non_html_page_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"{}".to_vec(), "application/json"))
        .mount(&server)
        .await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/1", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(engine.stats().total_crawled(), 1);
    assert_eq!(engine.stats().total_failed(), 1);
}

#[tokio::test]
async fn stop_signal_before_start_halts_immediately() {
    let server = MockServer::start().await;
    mount(&server, "/page/1", PAGE_1).await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/1", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    engine.stop_sender().send(()).unwrap();
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn writes_json_lines() {
    let server = MockServer::start().await;
    mount(&server, "/page/10/", PAGE_10).await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/10/", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut sink = JsonLinesSink::new(Vec::new());
    engine.start(&mut sink).await.unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let records: Vec<QuoteRecord> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].tags, vec!["humor", "love", "romantic", "women"]);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let spider = QuotesSpider::with_start_url("http://127.0.0.1:9/page/1").unwrap();
    let config = Config {
        timeout_secs: 0,
        ..Config::default()
    };
    let mut engine = quotescrape::engine_with_config(config, spider);
    let mut items: Vec<QuoteRecord> = vec![];
    assert!(matches!(
        engine.start(&mut items).await,
        Err(quotescrape::Error::Config(_))
    ));
}

#[tokio::test]
async fn redirect_target_is_not_fetched_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/b"))
        .mount(&server)
        .await;
    mount(
        &server,
        "/b",
        r#"<div class="quote"><span class="text">From b</span></div>"#,
    )
    .await;

    let spider = MultiSeedSpider {
        start_urls: vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())],
        inner: QuotesSpider::new().unwrap(),
    };
    let mut engine = quotescrape::engine_with_config(test_config(), spider);
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text.as_deref(), Some("From b"));
    assert_eq!(engine.stats().total_crawled(), 1);

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_owned()).collect();
    assert_eq!(paths, vec!["/a", "/b"]);
}

#[tokio::test]
async fn stats_cover_only_the_latest_run() {
    let server = MockServer::start().await;
    mount(&server, "/page/10/", PAGE_10).await;

    let spider = QuotesSpider::with_start_url(&format!("{}/page/10/", server.uri())).unwrap();
    let mut engine = quotescrape::engine_with_config(test_config(), spider);

    // Idle time before the crawl is not part of it
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let mut items: Vec<QuoteRecord> = vec![];
    engine.start(&mut items).await.unwrap();
    assert_eq!(engine.stats().elapsed_time(), 0);

    engine.start(&mut items).await.unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(engine.stats().total_crawled(), 1);
    assert_eq!(engine.stats().total_scraped(), 2);
}
