//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl cycle end-to-end against a temporary database.

use minnow::config::Config;
use minnow::rank::SqliteRankBackend;
use minnow::search::{SearchEngine, SearchService};
use minnow::storage::{DocumentStore, SqliteStore};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.user_agent = "MinnowTestBot/1.0".to_string();
    config.crawler.fetch_timeout_ms = 2000;
    config.crawler.robots_timeout_ms = 1000;
    config
}

/// Builds a service over a fresh in-memory store
fn test_service() -> SearchService<SqliteStore, SqliteRankBackend> {
    let store = Arc::new(Mutex::new(SqliteStore::in_memory().unwrap()));
    let rank = SqliteRankBackend::in_memory().unwrap();
    SearchService::new(test_config(), store, rank)
}

/// Mounts an allow-all robots.txt on a mock server
async fn mount_robots_allow(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(server)
        .await;
}

/// Mounts an HTML page on a mock server
async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_persists_linked_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;
    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            Welcome. <a href="{base}/b">Next</a>
            </body></html>"#
        ),
    )
    .await;
    mount_page(
        &server,
        "/b",
        "<html><head><title>Page B</title></head><body>Content B</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(2)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 2);
    assert_eq!(outcome.status, "COMPLETED");

    let store = service.store();
    let store = store.lock().unwrap();
    assert_eq!(store.count_documents().unwrap(), 2);

    let home = store.get_document(&format!("{base}/")).unwrap().unwrap();
    assert_eq!(home.title, "Home");
    assert!(home.content.contains("Welcome"));

    let page_b = store.get_document(&format!("{base}/b")).unwrap().unwrap();
    assert_eq!(page_b.title, "Page B");
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;

    // A densely linked site: every page links to every other page
    let links: String = (0..6)
        .map(|i| format!(r#"<a href="{base}/p{i}">p{i}</a>"#))
        .collect();
    mount_page(
        &server,
        "/",
        format!("<html><head><title>Hub</title></head><body>{links}</body></html>"),
    )
    .await;
    for i in 0..6 {
        mount_page(
            &server,
            &format!("/p{i}"),
            format!("<html><head><title>P{i}</title></head><body>{links}</body></html>"),
        )
        .await;
    }

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(3)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 3);

    let store = service.store();
    assert_eq!(store.lock().unwrap().count_documents().unwrap(), 3);
}

#[tokio::test]
async fn test_robots_disallowed_seed_crawls_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/",
        "<html><head><title>Hidden</title></head><body>secret</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(5)).await.unwrap();

    // Disallowed seed is a normal zero-page outcome, not an error
    assert_eq!(outcome.pages_crawled, 0);
    assert_eq!(outcome.status, "COMPLETED");

    let store = service.store();
    assert_eq!(store.lock().unwrap().count_documents().unwrap(), 0);
}

#[tokio::test]
async fn test_robots_disallowed_links_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{base}/private/x">Private</a>
            <a href="{base}/open">Open</a>
            </body></html>"#
        ),
    )
    .await;
    mount_page(
        &server,
        "/open",
        "<html><head><title>Open</title></head><body>ok</body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/private/x",
        "<html><head><title>Private</title></head><body>no</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(10)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 2);

    let store = service.store();
    let store = store.lock().unwrap();
    assert!(store.get_document(&format!("{base}/open")).unwrap().is_some());
    assert!(store
        .get_document(&format!("{base}/private/x"))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_fetch_failure_skips_page_without_consuming_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;
    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{base}/missing">Broken</a>
            <a href="{base}/ok">Fine</a>
            </body></html>"#
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/ok",
        "<html><head><title>Fine</title></head><body>still here</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(10)).await.unwrap();

    // The 404 page is skipped; only successful fetches count
    assert_eq!(outcome.pages_crawled, 2);

    let store = service.store();
    let store = store.lock().unwrap();
    assert_eq!(store.count_documents().unwrap(), 2);
    assert!(store
        .get_document(&format!("{base}/missing"))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_cyclic_links_crawled_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;
    mount_page(
        &server,
        "/",
        format!(r#"<html><head><title>A</title></head><body><a href="{base}/b">B</a></body></html>"#),
    )
    .await;
    mount_page(
        &server,
        "/b",
        format!(r#"<html><head><title>B</title></head><body><a href="{base}/">A</a></body></html>"#),
    )
    .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(10)).await.unwrap();

    // The cycle terminates via the visited set
    assert_eq!(outcome.pages_crawled, 2);
}

#[tokio::test]
async fn test_title_falls_back_to_url() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;
    mount_page(
        &server,
        "/",
        "<html><head></head><body>No title on this page</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    service.crawl(&format!("{base}/"), Some(1)).await.unwrap();

    let store = service.store();
    let store = store.lock().unwrap();
    let doc = store.get_document(&format!("{base}/")).unwrap().unwrap();
    assert_eq!(doc.title, format!("{base}/"));
}

#[tokio::test]
async fn test_missing_robots_defaults_to_allow() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No robots.txt mock: wiremock returns 404, which must default to allow
    mount_page(
        &server,
        "/",
        "<html><head><title>Open Anyway</title></head><body>hi</body></html>".to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = test_service();
    let outcome = service.crawl(&format!("{base}/"), Some(1)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 1);
}

#[tokio::test]
async fn test_recrawl_same_seed_does_not_duplicate() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots_allow(&server).await;
    mount_page(
        &server,
        "/",
        "<html><head><title>Stable</title></head><body>same page</body></html>".to_string(),
    )
    .await;

    let service = test_service();
    service.crawl(&format!("{base}/"), Some(1)).await.unwrap();
    service.crawl(&format!("{base}/"), Some(1)).await.unwrap();

    let store = service.store();
    assert_eq!(store.lock().unwrap().count_documents().unwrap(), 1);
}
