//! HTML extraction for crawled pages
//!
//! Pulls the page title, visible text, and outbound links out of a fetched
//! HTML document. Link extraction resolves relative hrefs against the page
//! URL and keeps only absolute HTTP(S) targets.

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from the <title> tag), if present
    pub title: Option<String>,

    /// Whitespace-normalized text content of the page
    pub text: String,

    /// Outbound links resolved to absolute URLs
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts title, text, and links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used to resolve relative links
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Truncates text to at most `limit` characters
///
/// Operates on character boundaries so multi-byte text never splits.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Extracts the page title from the document
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the visible text of the document with collapsed whitespace
fn extract_text(document: &Html) -> String {
    let words: Vec<&str> = document
        .root_element()
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect();
    words.join(" ")
}

/// Extracts all followable links from the document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, filtering out unfollowable targets
///
/// Returns None for javascript:/mailto:/tel:/data: schemes, fragment-only
/// anchors, unparseable hrefs, and anything that does not resolve to an
/// absolute HTTP(S) URL.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_missing_title_is_none() {
        let html = r#"<html><head></head><body>No title here</body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_extract_text_collapses_whitespace() {
        let html = "<html><body><p>Hello\n   world</p><p>again</p></body></html>";
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.text, "Hello world again");
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].as_str(), "https://example.com/other");
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="http://other.test/page">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].as_str(), "http://other.test/page");
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r##"
            <html><body>
                <a href="javascript:void(0)">js</a>
                <a href="mailto:a@b.test">mail</a>
                <a href="tel:+1234">tel</a>
                <a href="data:text/html,x">data</a>
                <a href="#section">anchor</a>
            </body></html>
        "##;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html><body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="/another">Valid</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links.len(), 2);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
