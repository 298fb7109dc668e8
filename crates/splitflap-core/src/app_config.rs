use std::net::SocketAddr;
use std::path::PathBuf;

/// Which upstream pipeline feeds the display.
///
/// The two pipelines emit different entry shapes and are chosen once per
/// deployment; they are never mixed within a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedVariant {
    /// Admin GraphQL API, dates from the `custom.date_and_time` metafield,
    /// converted to Central Time.
    Graphql,
    /// Admin REST API, dates sliced verbatim from `created_at`/`published_at`.
    Rest,
}

impl std::fmt::Display for FeedVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedVariant::Graphql => write!(f, "graphql"),
            FeedVariant::Rest => write!(f, "rest"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Bare shop host, e.g. `"example.myshopify.com"` (scheme stripped).
    pub shop_domain: String,
    pub access_token: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_version: String,
    pub collection_id: String,
    pub feed_variant: FeedVariant,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[redacted]")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[redacted]"))
            .field("api_version", &self.api_version)
            .field("collection_id", &self.collection_id)
            .field("feed_variant", &self.feed_variant)
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
