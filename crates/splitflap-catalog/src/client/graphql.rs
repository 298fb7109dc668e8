//! Collection products via the Admin GraphQL API.

use serde_json::json;

use super::{CatalogClient, ProductPage, PAGE_SIZE};
use crate::error::CatalogError;
use crate::types::{CollectionProductsData, GraphqlProduct, GraphqlResponse};

const COLLECTION_GID_PREFIX: &str = "gid://shopify/Collection/";

const COLLECTION_PRODUCTS_QUERY: &str = r#"
query CollectionProducts($id: ID!, $first: Int!) {
  collection(id: $id) {
    products(first: $first) {
      edges {
        node {
          id
          title
          descriptionHtml
          status
          variants(first: 1) {
            edges {
              node {
                inventoryQuantity
              }
            }
          }
          metafields(first: 3, namespace: "custom") {
            edges {
              node {
                namespace
                key
                value
              }
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

/// Expands a numeric collection id into its GID. Full GIDs pass through.
#[must_use]
pub fn collection_gid(collection_id: &str) -> String {
    let id = collection_id.trim();
    if id.starts_with("gid://") {
        id.to_owned()
    } else {
        format!("{COLLECTION_GID_PREFIX}{id}")
    }
}

impl CatalogClient {
    /// Fetches the first page of a collection's products from the GraphQL API.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`], [`CatalogError::NotFound`],
    ///   [`CatalogError::Unauthorized`], [`CatalogError::UnexpectedStatus`]
    ///   for non-2xx responses.
    /// - [`CatalogError::Graphql`] when the response carries an `errors` array.
    /// - [`CatalogError::CollectionNotFound`] when `collection` is `null`.
    /// - [`CatalogError::Deserialize`] when the body does not match the query shape.
    /// - [`CatalogError::Http`] on network failure.
    pub async fn fetch_graphql_products(
        &self,
        collection_id: &str,
    ) -> Result<ProductPage<GraphqlProduct>, CatalogError> {
        let url = self.admin_url("graphql.json")?;
        let gid = collection_gid(collection_id);
        let payload = json!({
            "query": COLLECTION_PRODUCTS_QUERY,
            "variables": { "id": gid, "first": PAGE_SIZE },
        });

        let response = self
            .authorized(self.client.post(url.clone()))
            .json(&payload)
            .send()
            .await?;
        let response = self.check_status(response, &url)?;

        let envelope: GraphqlResponse<CollectionProductsData> =
            Self::decode(response, &format!("collection products for {gid}")).await?;

        if !envelope.errors.is_empty() {
            let messages = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CatalogError::Graphql(messages));
        }

        let collection = envelope
            .data
            .and_then(|data| data.collection)
            .ok_or_else(|| CatalogError::CollectionNotFound {
                collection_id: gid.clone(),
            })?;

        let has_next_page = collection
            .products
            .page_info
            .as_ref()
            .is_some_and(|page| page.has_next_page);

        Ok(ProductPage {
            products: collection.products.into_nodes(),
            has_next_page,
        })
    }
}
