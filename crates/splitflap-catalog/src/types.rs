//! Shopify Admin API response types for both feed variants.
//!
//! ## GraphQL (`graphql.json`)
//! Connections come back as `{ edges: [{ node: ... }], pageInfo: ... }`.
//! Product `status` is upper case (`"ACTIVE"`, `"DRAFT"`, `"ARCHIVED"`).
//! Metafield `value` is always a string; for `custom.date_and_time` it is a
//! JSON-encoded array of UTC timestamps, e.g. `"[\"2025-05-02T23:00:00Z\"]"`.
//!
//! ## REST (`products.json`)
//! Flat product objects with lower-case `status`
//! (`"active"`, `"draft"`, `"archived"`). `published_at` is `null` for
//! unpublished products.
//!
//! ### `inventoryQuantity` / `inventory_quantity`
//! Three observable states matter to the display: the field is missing (no
//! status is emitted), it is `null` (treated as sold out), or it is an
//! integer. Both variant types model it as `Option<Option<i64>>`.

use serde::{Deserialize, Deserializer};

/// Deserializes a field that is present (possibly `null`) into `Some(..)`.
///
/// Combined with `#[serde(default)]` this distinguishes a missing field
/// (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// GraphQL
// ---------------------------------------------------------------------------

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `data` payload of the collection products query.
#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    /// `null` when the collection id does not exist.
    pub collection: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    pub products: Connection<GraphqlProduct>,
}

/// A Relay-style connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<T> Connection<T> {
    /// Nodes in upstream order.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// First node, if the connection is non-empty.
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|edge| &edge.node)
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A product node from the Admin GraphQL API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlProduct {
    /// Product GID, e.g. `"gid://shopify/Product/8123456789"`.
    pub id: String,
    pub title: String,
    /// `"ACTIVE"`, `"DRAFT"` or `"ARCHIVED"`.
    pub status: String,
    /// First variant only (`variants(first: 1)`).
    #[serde(default)]
    pub variants: Option<Connection<GraphqlVariant>>,
    /// Up to three metafields from the `custom` namespace.
    #[serde(default)]
    pub metafields: Option<Connection<Metafield>>,
}

impl GraphqlProduct {
    /// Inventory quantity of the first variant, tri-state (see module docs).
    pub fn first_variant_inventory(&self) -> Option<Option<i64>> {
        self.variants
            .as_ref()
            .and_then(Connection::first)
            .and_then(|variant| variant.inventory_quantity)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlVariant {
    #[serde(default, deserialize_with = "present")]
    pub inventory_quantity: Option<Option<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct Metafield {
    #[serde(default)]
    pub namespace: String,
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// REST
// ---------------------------------------------------------------------------

/// Top-level response from `GET /admin/api/{version}/products.json`.
#[derive(Debug, Deserialize)]
pub struct RestProductsResponse {
    pub products: Vec<RestProduct>,
}

/// A product from the Admin REST API.
#[derive(Debug, Deserialize)]
pub struct RestProduct {
    pub title: String,
    /// `"active"`, `"draft"` or `"archived"`.
    pub status: String,
    /// ISO-8601 timestamp, e.g. `"2025-05-02T10:00:00-05:00"`.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO-8601 timestamp; `null` while unpublished.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub variants: Vec<RestVariant>,
}

impl RestProduct {
    /// Inventory quantity of the first variant, tri-state (see module docs).
    pub fn first_variant_inventory(&self) -> Option<Option<i64>> {
        self.variants
            .first()
            .and_then(|variant| variant.inventory_quantity)
    }
}

#[derive(Debug, Deserialize)]
pub struct RestVariant {
    #[serde(default, deserialize_with = "present")]
    pub inventory_quantity: Option<Option<i64>>,
}
