//! HTTP fetcher for crawl page requests
//!
//! Builds the crawler's HTTP client and classifies fetch results so the
//! engine can treat every failure as page-scoped rather than run-fatal.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching a single page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page body
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// Network-level failure (timeout, connection refused, TLS error)
    Network {
        /// Error description
        reason: String,
    },
}

/// Builds the HTTP client used for page and robots.txt fetches
///
/// # Arguments
///
/// * `user_agent` - The crawler identity string sent with every request
/// * `timeout` - Default per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the outcome
///
/// A non-success status or network error is a soft failure: the caller
/// skips the page without consuming crawl budget.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchOutcome::HttpStatus {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    final_url,
                    status: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::Network {
                    reason: e.to_string(),
                },
            }
        }
        Err(e) => FetchOutcome::Network {
            reason: if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("MinnowBot/1.0", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let client = build_http_client("MinnowBot/1.0", Duration::from_millis(200)).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();

        match fetch_page(&client, &url).await {
            FetchOutcome::Network { .. } => {}
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
