//! HTTP client for the Shopify Admin API (GraphQL and REST).

mod graphql;
mod rest;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use splitflap_core::AppConfig;

use crate::error::CatalogError;

pub use graphql::collection_gid;

/// Page size requested from both APIs. Only the first page is ever read.
pub const PAGE_SIZE: u32 = 100;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// First page of a collection's products plus whether more pages exist.
#[derive(Debug)]
pub struct ProductPage<T> {
    pub products: Vec<T>,
    pub has_next_page: bool,
}

/// Client for one shop's Admin API.
///
/// Non-2xx responses come back as typed [`CatalogError`]s. Nothing is retried:
/// a failed fetch fails the current listing and the next request starts over.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    access_token: String,
    api_version: String,
}

impl CatalogClient {
    /// Creates a client for `https://{shop_domain}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidShopUrl`] if the
    /// domain does not form a valid URL.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        Self::with_base_url(
            &format!("https://{shop_domain}"),
            access_token,
            api_version,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.shop_domain,
            &config.access_token,
            &config.api_version,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidShopUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join` append rather than replace the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidShopUrl {
            shop_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
        })
    }

    /// Builds `{base}/admin/api/{version}/{resource}`.
    fn admin_url(&self, resource: &str) -> Result<Url, CatalogError> {
        let path = format!("admin/api/{}/{resource}", self.api_version);
        self.base_url
            .join(&path)
            .map_err(|e| CatalogError::InvalidShopUrl {
                shop_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Maps non-2xx statuses to typed errors.
    fn check_status(&self, response: Response, url: &Url) -> Result<Response, CatalogError> {
        let status = response.status();
        let url = url.to_string();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(60);

            return Err(CatalogError::RateLimited {
                domain: self.base_url.host_str().unwrap_or_default().to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { url });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized {
                status: status.as_u16(),
                url,
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }

    /// Reads the body and deserializes it, tagging failures with `context`.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, CatalogError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
