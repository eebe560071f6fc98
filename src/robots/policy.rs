//! Robots.txt policy representation
//!
//! Wraps the robotstxt crate behind a simplified interface with an explicit
//! allow-all fallback for domains whose robots.txt cannot be fetched.

use robotstxt::DefaultMatcher;

/// Crawl permission rules for a single domain
///
/// Politeness is best-effort: when a robots.txt file cannot be fetched or
/// returns a non-success status, the policy defaults to allow-all so that
/// infrastructure failures never block crawling.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (unused when allow_all is set)
    rules: String,
    /// Whether every URL is allowed regardless of rules
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_rules(rules: &str) -> Self {
        Self {
            rules: rules.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// Used as the fallback when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self {
            rules: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this policy allows everything unconditionally
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Checks whether a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The candidate URL (absolute or path)
    /// * `user_agent` - The crawler identity token
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.rules.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.rules, user_agent, url)
    }
}
