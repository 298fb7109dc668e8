//! UTC instant → civil calendar/clock in a named zone.
//!
//! The workshop venue runs on Central Time, so every metafield timestamp is
//! shown as America/Chicago wall-clock time, with the DST offset in force on
//! that date.

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc,
};
use chrono_tz::Tz;

/// Zone the display renders dates and times in.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::America::Chicago;

/// Wall-clock reading of an instant in a specific zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    local: DateTime<Tz>,
}

impl CivilDateTime {
    /// Converts a UTC instant into `zone`'s civil time.
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>, zone: Tz) -> Self {
        Self {
            local: instant.with_timezone(&zone),
        }
    }

    /// Parses an ISO-8601 timestamp and converts it to `zone`.
    ///
    /// Accepts RFC 3339 with any offset, a date-time without an offset
    /// (read as UTC, with or without seconds) and a bare `YYYY-MM-DD`
    /// (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns the RFC 3339 parse error when no accepted form matches.
    pub fn parse(raw: &str, zone: Tz) -> Result<Self, chrono::ParseError> {
        let raw = raw.trim();
        let instant = match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => instant.with_timezone(&Utc),
            Err(rfc3339_err) => parse_naive_utc(raw).ok_or(rfc3339_err)?,
        };
        Ok(Self::from_utc(instant, zone))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.local.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.local.day()
    }

    /// Hour on the 24-hour clock, `0..=23`.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    /// `"MM"`.
    #[must_use]
    pub fn month_code(&self) -> String {
        format!("{:02}", self.month())
    }

    /// `"YYYY"`.
    #[must_use]
    pub fn year_code(&self) -> String {
        format!("{:04}", self.year())
    }

    /// `"MMDD"`.
    #[must_use]
    pub fn date_code(&self) -> String {
        format!("{:02}{:02}", self.month(), self.day())
    }

    /// 12-hour clock without separator, e.g. `"0600pm"`, `"1200am"`.
    #[must_use]
    pub fn time_code(&self) -> String {
        let (is_pm, hour12) = self.local.hour12();
        let suffix = if is_pm { "pm" } else { "am" };
        format!("{hour12:02}{:02}{suffix}", self.minute())
    }

    /// RFC 3339 with milliseconds and the zone's UTC offset,
    /// e.g. `"2025-05-02T18:00:00.000-05:00"`.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.local.to_rfc3339_opts(SecondsFormat::Millis, false)
    }
}

fn parse_naive_utc(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok()
        .map(|naive| naive.and_utc())
}
