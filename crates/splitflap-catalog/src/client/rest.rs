//! Collection products via the Admin REST API.

use super::{CatalogClient, ProductPage, PAGE_SIZE};
use crate::error::CatalogError;
use crate::types::{RestProduct, RestProductsResponse};

impl CatalogClient {
    /// Fetches the first page of a collection's products from
    /// `products.json?collection_id=...`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`], [`CatalogError::NotFound`],
    ///   [`CatalogError::Unauthorized`], [`CatalogError::UnexpectedStatus`]
    ///   for non-2xx responses.
    /// - [`CatalogError::Deserialize`] when the body is not a products payload.
    /// - [`CatalogError::Http`] on network failure.
    pub async fn fetch_rest_products(
        &self,
        collection_id: &str,
    ) -> Result<ProductPage<RestProduct>, CatalogError> {
        let url = self.rest_products_url(collection_id)?;

        let response = self
            .authorized(self.client.get(url.clone()))
            .send()
            .await?;
        let response = self.check_status(response, &url)?;

        let has_next_page = has_next_link(
            response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok()),
        );

        let parsed: RestProductsResponse = Self::decode(
            response,
            &format!("products for collection {collection_id}"),
        )
        .await?;

        Ok(ProductPage {
            products: parsed.products,
            has_next_page,
        })
    }

    pub(super) fn rest_products_url(
        &self,
        collection_id: &str,
    ) -> Result<reqwest::Url, CatalogError> {
        let mut url = self.admin_url("products.json")?;
        url.query_pairs_mut()
            .append_pair("collection_id", collection_id.trim())
            .append_pair("limit", &PAGE_SIZE.to_string());
        Ok(url)
    }
}

/// Whether a `Link` header advertises a `rel="next"` page.
pub(super) fn has_next_link(link_header: Option<&str>) -> bool {
    link_header.is_some_and(|header| {
        header
            .split(',')
            .any(|segment| segment.contains(r#"rel="next""#))
    })
}
