//! Robots.txt handling module
//!
//! Provides per-domain crawl permission rules with lazy fetching and
//! run-lifetime caching. Fetch failures degrade to allow-all so politeness
//! checks never abort a crawl.

mod cache;
mod policy;

pub use cache::RobotsPolicyCache;
pub use policy::RobotsPolicy;
