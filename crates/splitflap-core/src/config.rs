use crate::app_config::{AppConfig, FeedVariant};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let shop_domain = normalize_shop_domain(&require("SHOPIFY_SHOP")?);
    let access_token = require("SHOPIFY_API_ACCESS_TOKEN")?;
    let collection_id = require("SHOPIFY_COLLECTION_ID")?;
    let api_key = lookup("SHOPIFY_API_KEY").ok();
    let api_secret = lookup("SHOPIFY_API_SECRET").ok();
    let api_version = or_default("SHOPIFY_API_VERSION", "2025-07");

    let feed_variant = parse_feed_variant(&or_default("SPLITFLAP_FEED_VARIANT", "graphql"))?;

    let host = or_default("SPLITFLAP_BIND_HOST", "0.0.0.0");
    let port = parse_u16("PORT", "8080")?;
    let bind_addr = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "SPLITFLAP_BIND_HOST".to_string(),
            reason: e.to_string(),
        })?;

    let static_dir = PathBuf::from(or_default("SPLITFLAP_STATIC_DIR", "public"));
    let log_level = or_default("SPLITFLAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SPLITFLAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SPLITFLAP_USER_AGENT", "splitflap/0.1 (workshop-display)");

    Ok(AppConfig {
        shop_domain,
        access_token,
        api_key,
        api_secret,
        api_version,
        collection_id,
        feed_variant,
        bind_addr,
        static_dir,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

/// Strips a leading `http://`/`https://` and any trailing slash so the value
/// can be used as a bare host.
fn normalize_shop_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// Parse a string into a `FeedVariant`.
///
/// Matching is case-insensitive. Unknown values are rejected rather than
/// defaulted.
fn parse_feed_variant(s: &str) -> Result<FeedVariant, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "graphql" => Ok(FeedVariant::Graphql),
        "rest" => Ok(FeedVariant::Rest),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SPLITFLAP_FEED_VARIANT".to_string(),
            reason: format!("expected \"graphql\" or \"rest\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SHOPIFY_SHOP", "https://workshop-test.myshopify.com");
        m.insert("SHOPIFY_API_ACCESS_TOKEN", "shpat_test");
        m.insert("SHOPIFY_COLLECTION_ID", "123456789");
        m
    }

    #[test]
    fn parse_feed_variant_graphql() {
        assert_eq!(parse_feed_variant("graphql").unwrap(), FeedVariant::Graphql);
    }

    #[test]
    fn parse_feed_variant_rest_is_case_insensitive() {
        assert_eq!(parse_feed_variant("REST").unwrap(), FeedVariant::Rest);
    }

    #[test]
    fn parse_feed_variant_unknown_fails() {
        let err = parse_feed_variant("soap").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SPLITFLAP_FEED_VARIANT")
        );
    }

    #[test]
    fn normalize_shop_domain_strips_scheme_and_slash() {
        assert_eq!(
            normalize_shop_domain("https://workshop-test.myshopify.com/"),
            "workshop-test.myshopify.com"
        );
        assert_eq!(
            normalize_shop_domain("http://workshop-test.myshopify.com"),
            "workshop-test.myshopify.com"
        );
        assert_eq!(
            normalize_shop_domain("workshop-test.myshopify.com"),
            "workshop-test.myshopify.com"
        );
    }

    #[test]
    fn build_app_config_fails_without_shop() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_SHOP"),
            "expected MissingEnvVar(SHOPIFY_SHOP), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_access_token() {
        let mut map = full_env();
        map.remove("SHOPIFY_API_ACCESS_TOKEN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_API_ACCESS_TOKEN"),
            "expected MissingEnvVar(SHOPIFY_API_ACCESS_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_collection_id_as_missing() {
        let mut map = full_env();
        map.insert("SHOPIFY_COLLECTION_ID", "  ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_COLLECTION_ID"),
            "expected MissingEnvVar(SHOPIFY_COLLECTION_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.shop_domain, "workshop-test.myshopify.com");
        assert_eq!(cfg.access_token, "shpat_test");
        assert_eq!(cfg.collection_id, "123456789");
        assert!(cfg.api_key.is_none());
        assert!(cfg.api_secret.is_none());
        assert_eq!(cfg.api_version, "2025-07");
        assert_eq!(cfg.feed_variant, FeedVariant::Graphql);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.static_dir, std::path::PathBuf::from("public"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "splitflap/0.1 (workshop-display)");
    }

    #[test]
    fn build_app_config_port_override() {
        let mut map = full_env();
        map.insert("PORT", "3001");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.bind_addr.port(), 3001);
    }

    #[test]
    fn build_app_config_port_invalid() {
        let mut map = full_env();
        map.insert("PORT", "eighty");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORT"),
            "expected InvalidEnvVar(PORT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_bind_host_invalid() {
        let mut map = full_env();
        map.insert("SPLITFLAP_BIND_HOST", "not a host");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SPLITFLAP_BIND_HOST"),
            "expected InvalidEnvVar(SPLITFLAP_BIND_HOST), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_request_timeout_invalid() {
        let mut map = full_env();
        map.insert("SPLITFLAP_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SPLITFLAP_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SPLITFLAP_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rest_variant_and_credentials() {
        let mut map = full_env();
        map.insert("SPLITFLAP_FEED_VARIANT", "rest");
        map.insert("SHOPIFY_API_KEY", "key");
        map.insert("SHOPIFY_API_SECRET", "secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.feed_variant, FeedVariant::Rest);
        assert_eq!(cfg.api_key.as_deref(), Some("key"));
        assert_eq!(cfg.api_secret.as_deref(), Some("secret"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = full_env();
        map.insert("SHOPIFY_API_SECRET", "very-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("shpat_test"));
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
