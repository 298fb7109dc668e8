//! Schedule records sent to the split-flap display.
//!
//! The display firmware reads fixed-width strings: `date` is `MMDD`, `time`
//! is four digits (plus `am`/`pm` for the metafield feed) and `status` is a
//! single letter. Field names and their order on the wire are part of that
//! contract.

use serde::{Deserialize, Serialize};

/// Display code for a workshop with seats left.
pub const STATUS_AVAILABLE: &str = "A";
/// Display code for a sold-out workshop.
pub const STATUS_SOLD_OUT: &str = "B";

/// One row on the display.
///
/// Serialized untagged: the payload carries no discriminator, each deployment
/// emits only one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleEntry {
    Metafield(MetafieldEntry),
    Timestamp(TimestampEntry),
}

/// Entry built from the GraphQL feed, with Central Time date fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetafieldEntry {
    /// Shopify product GID, e.g. `"gid://shopify/Product/1"`.
    pub id: String,
    /// Workshop title.
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// `MMDD` in Central Time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `hhmm` plus `am`/`pm`, e.g. `"0600pm"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// RFC 3339 rendering of the converted instant, carrying the Central offset.
    #[serde(
        rename = "fullDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub full_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Entry built from the REST feed, with dates sliced verbatim from UTC
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampEntry {
    pub class: String,
    /// `MMDD` from `created_at`, or empty.
    pub date: String,
    /// 24-hour `HHMM` from `published_at`, or empty.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `GET /api/workshops`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopsResponse {
    pub data: Vec<ScheduleEntry>,
}

/// Maps a first-variant inventory quantity to a display status code.
///
/// `None` means the quantity was present but `null`, which counts as not in
/// stock.
#[must_use]
pub fn sold_out_status(inventory_quantity: Option<i64>) -> &'static str {
    match inventory_quantity {
        Some(qty) if qty > 0 => STATUS_AVAILABLE,
        _ => STATUS_SOLD_OUT,
    }
}
