//! Conversion from raw catalog products to display schedule entries.
//!
//! Each feed variant has its own function. Both return `None` for products
//! that must not reach the display.

use chrono::NaiveDate;
use splitflap_core::{sold_out_status, MetafieldEntry, TimestampEntry};

use crate::civil_time::{CivilDateTime, DISPLAY_TIMEZONE};
use crate::types::{GraphqlProduct, Metafield, RestProduct};

/// Product status accepted from the GraphQL API.
pub const GRAPHQL_ACTIVE_STATUS: &str = "ACTIVE";
/// Product status accepted from the REST API.
pub const REST_ACTIVE_STATUS: &str = "active";
/// Metafield key holding the workshop's start timestamps.
pub const DATE_AND_TIME_KEY: &str = "date_and_time";

/// Builds the display entry for a GraphQL product.
///
/// Returns `None` when the product is not active, or when its Central Time
/// date falls before `today` (a UTC calendar day).
pub fn schedule_from_graphql(product: &GraphqlProduct, today: NaiveDate) -> Option<MetafieldEntry> {
    if product.status != GRAPHQL_ACTIVE_STATUS {
        return None;
    }

    let mut entry = MetafieldEntry {
        id: product.id.clone(),
        class: product.title.clone(),
        ..MetafieldEntry::default()
    };

    if let Some(metafields) = &product.metafields {
        for edge in &metafields.edges {
            apply_date_and_time(&mut entry, &product.id, &edge.node);
        }
    }

    if let Some(quantity) = product.first_variant_inventory() {
        entry.status = Some(sold_out_status(quantity).to_string());
    }

    if let (Some(date), Some(year)) = (&entry.date, &entry.year) {
        if let Some(workshop_day) = rebuild_date(year, date) {
            if workshop_day < today {
                return None;
            }
        }
    }

    Some(entry)
}

/// Builds the display entry for a REST product.
///
/// Returns `None` when the product is not active. There is no date cutoff.
pub fn schedule_from_rest(product: &RestProduct) -> Option<TimestampEntry> {
    if product.status != REST_ACTIVE_STATUS {
        return None;
    }

    let date = product
        .created_at
        .as_deref()
        .map(|raw| char_slice(raw, 5, 10).replacen('-', "", 1))
        .unwrap_or_default();
    let time = product
        .published_at
        .as_deref()
        .map(|raw| char_slice(raw, 11, 16).replacen(':', "", 1))
        .unwrap_or_default();

    Some(TimestampEntry {
        class: product.title.clone(),
        date,
        time,
        status: product
            .first_variant_inventory()
            .map(|quantity| sold_out_status(quantity).to_string()),
    })
}

/// Applies a `date_and_time` metafield to `entry`.
///
/// Every timestamp in the array is applied in order, so the last valid one
/// wins. Undecodable values are logged and leave the entry untouched.
fn apply_date_and_time(entry: &mut MetafieldEntry, product_id: &str, metafield: &Metafield) {
    if metafield.key != DATE_AND_TIME_KEY {
        return;
    }

    let decoded: serde_json::Value = match serde_json::from_str(&metafield.value) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                product_id,
                namespace = %metafield.namespace,
                error = %e,
                "could not parse date_and_time metafield value"
            );
            return;
        }
    };

    let Some(values) = decoded.as_array() else {
        return;
    };

    for value in values {
        let Some(raw) = value.as_str() else {
            tracing::warn!(product_id, value = %value, "date_and_time entry is not a string");
            continue;
        };

        match CivilDateTime::parse(raw, DISPLAY_TIMEZONE) {
            Ok(civil) => {
                entry.month = Some(civil.month_code());
                entry.year = Some(civil.year_code());
                entry.date = Some(civil.date_code());
                entry.time = Some(civil.time_code());
                entry.full_date_time = Some(civil.to_rfc3339());
            }
            Err(e) => {
                tracing::warn!(
                    product_id,
                    timestamp = raw,
                    error = %e,
                    "skipping unparseable date_and_time entry"
                );
            }
        }
    }
}

/// Rebuilds a calendar date from a `YYYY` year and an `MMDD` date code.
///
/// Returns `None` when either part does not parse or names an impossible
/// day; such entries are kept by the caller.
fn rebuild_date(year: &str, date: &str) -> Option<NaiveDate> {
    let year = year.parse::<i32>().ok()?;
    let month = date.get(0..2)?.parse::<u32>().ok()?;
    let day = date.get(2..4)?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Characters `start..end` of `raw`, clamped to its length.
fn char_slice(raw: &str, start: usize, end: usize) -> String {
    raw.chars().skip(start).take(end.saturating_sub(start)).collect()
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
