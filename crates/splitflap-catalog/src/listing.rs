//! Fetch-and-transform pipeline behind the workshops feed.

use chrono::NaiveDate;
use splitflap_core::{FeedVariant, ScheduleEntry};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::schedule::{schedule_from_graphql, schedule_from_rest};

/// Fetches the collection once and returns the display entries in upstream
/// order.
///
/// The GraphQL feed propagates fetch failures. The REST feed logs them and
/// returns an empty list, so the display keeps receiving a valid document.
///
/// # Errors
///
/// Returns the underlying [`CatalogError`] when the GraphQL fetch fails.
/// The REST feed never errors.
pub async fn list_workshops(
    client: &CatalogClient,
    variant: FeedVariant,
    collection_id: &str,
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>, CatalogError> {
    match variant {
        FeedVariant::Graphql => {
            let page = client.fetch_graphql_products(collection_id).await?;
            if page.has_next_page {
                tracing::debug!(
                    collection_id,
                    fetched = page.products.len(),
                    "collection has more products than the first page; ignoring the rest"
                );
            }
            let fetched = page.products.len();
            let entries: Vec<ScheduleEntry> = page
                .products
                .iter()
                .filter_map(|product| schedule_from_graphql(product, today))
                .map(ScheduleEntry::Metafield)
                .collect();
            tracing::debug!(fetched, shown = entries.len(), "built graphql schedule");
            Ok(entries)
        }
        FeedVariant::Rest => {
            let products = match client.fetch_rest_products(collection_id).await {
                Ok(page) => {
                    if page.has_next_page {
                        tracing::debug!(
                            collection_id,
                            fetched = page.products.len(),
                            "collection has more products than the first page; ignoring the rest"
                        );
                    }
                    page.products
                }
                Err(e) => {
                    tracing::error!(collection_id, error = %e, "error fetching products");
                    Vec::new()
                }
            };
            let entries: Vec<ScheduleEntry> = products
                .iter()
                .filter_map(schedule_from_rest)
                .map(ScheduleEntry::Timestamp)
                .collect();
            tracing::debug!(
                fetched = products.len(),
                shown = entries.len(),
                "built rest schedule"
            );
            Ok(entries)
        }
    }
}
