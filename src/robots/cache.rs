//! Per-domain robots.txt policy cache
//!
//! Policies are fetched lazily on first access to a domain and cached for
//! the lifetime of the crawl run. There is no TTL or refresh: a run is
//! bounded by its page budget and short-lived relative to robots.txt churn.

use crate::robots::RobotsPolicy;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Lazily populated cache of per-domain crawl permission rules
///
/// Keyed by the URL origin (`scheme://host[:port]`). A fetch failure or
/// non-success status produces an allow-all policy, so one unreachable
/// robots.txt never blocks the run.
pub struct RobotsPolicyCache {
    client: Client,
    user_agent: String,
    timeout: Duration,
    policies: HashMap<String, RobotsPolicy>,
}

impl RobotsPolicyCache {
    /// Creates a new cache for a single crawl run
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client used for robots.txt fetches
    /// * `user_agent` - The crawler identity token evaluated against rules
    /// * `timeout` - Per-fetch timeout for robots.txt requests
    pub fn new(client: Client, user_agent: &str, timeout: Duration) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            timeout,
            policies: HashMap::new(),
        }
    }

    /// Returns the origin key (`scheme://host[:port]`) for a URL
    pub fn domain_key(url: &Url) -> String {
        url.origin().ascii_serialization()
    }

    /// Resolves the policy for a URL's domain, fetching it on first access
    pub async fn policy_for(&mut self, url: &Url) -> &RobotsPolicy {
        let key = Self::domain_key(url);

        if !self.policies.contains_key(&key) {
            let policy = self.fetch_policy(&key).await;
            self.policies.insert(key.clone(), policy);
        }

        self.policies.entry(key).or_insert_with(RobotsPolicy::allow_all)
    }

    /// Checks whether a URL is allowed for this crawler's identity
    pub async fn is_allowed(&mut self, url: &Url) -> bool {
        let user_agent = self.user_agent.clone();
        let policy = self.policy_for(url).await;
        policy.is_allowed(url.as_str(), &user_agent)
    }

    /// Returns the number of cached domain policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true if no policies have been cached yet
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Fetches and parses robots.txt for an origin
    ///
    /// Any failure (network error, timeout, non-success status) degrades to
    /// an allow-all policy.
    async fn fetch_policy(&self, origin: &str) -> RobotsPolicy {
        let robots_url = format!("{}/robots.txt", origin);
        tracing::debug!("Fetching robots.txt: {}", robots_url);

        let response = self
            .client
            .get(&robots_url)
            .timeout(self.timeout)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => RobotsPolicy::from_rules(&body),
                Err(e) => {
                    tracing::warn!("Failed to read robots.txt body for {}: {}", origin, e);
                    RobotsPolicy::allow_all()
                }
            },
            Ok(resp) => {
                tracing::debug!(
                    "robots.txt for {} returned status {}, defaulting to allow",
                    origin,
                    resp.status()
                );
                RobotsPolicy::allow_all()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not fetch robots.txt for {}: {}. Defaulting to allow.",
                    origin,
                    e
                );
                RobotsPolicy::allow_all()
            }
        }
    }
}
