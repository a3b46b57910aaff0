//! REST API request and response types
//!
//! Timestamps in query strings may be a bare date (`2024-01-31`, meaning
//! midnight) or a date-time with either a `T` or a space separator, with an
//! optional UTC offset.

use crate::analytics::SaleFilter;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Rows returned when a request does not set `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Hard cap on `limit`
pub const MAX_PAGE_SIZE: u32 = 1000;
/// Inventory history entries returned by default
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

// ============================================================================
// Timestamp parsing
// ============================================================================

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying forms other than RFC 3339
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a date or date-time. A bare date is midnight.
///
/// Timestamps with a UTC offset (`Z`, `+05:00`) are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            OFFSET_DATETIME_FORMATS.iter().find_map(|fmt| {
                DateTime::parse_from_str(raw, fmt)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// `skip` / `limit` pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    /// (offset, limit) with defaults applied and the limit capped
    pub fn resolve(&self) -> (u32, u32) {
        (
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    pub weeks: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub months: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AnnualQuery {
    pub years: Option<u32>,
}

/// Two inclusive ranges to compare
#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub period1_start: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub period1_end: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub period2_start: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub period2_end: NaiveDateTime,
}

/// Optional sale predicates; `end_date` is inclusive
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilterQuery {
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub end_date: Option<NaiveDateTime>,
    pub product_id: Option<i64>,
    pub category_id: Option<i64>,
    pub platform: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl SaleFilterQuery {
    pub fn to_filter(&self) -> SaleFilter {
        let mut filter = SaleFilter::new();

        if let Some(start) = self.start_date {
            filter = filter.from(start);
        }
        if let Some(end) = self.end_date {
            filter = filter.until(end);
        }
        // Zero ids mean "not set"
        if let Some(product_id) = self.product_id.filter(|id| *id != 0) {
            filter = filter.product(product_id);
        }
        if let Some(category_id) = self.category_id.filter(|id| *id != 0) {
            filter = filter.category(category_id);
        }
        if let Some(platform) = self.platform.as_deref().filter(|p| !p.is_empty()) {
            filter = filter.platform(platform);
        }

        let (offset, limit) = Pagination {
            skip: self.skip,
            limit: self.limit,
        }
        .resolve();
        filter.paginate(offset, limit)
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
