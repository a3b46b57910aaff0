//! Sale record store seam
//!
//! The aggregation engine only needs two read shapes from whatever persists
//! sales: a predicate query and a calendar year/month query.

use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recorded sale. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total_price: f64,
    pub sale_date: NaiveDateTime,
    pub platform: Option<String>,
}

/// Upper bound of a sale date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    /// `sale_date <= t`
    Inclusive(NaiveDateTime),
    /// `sale_date < t`
    Exclusive(NaiveDateTime),
}

impl EndBound {
    pub fn admits(&self, ts: NaiveDateTime) -> bool {
        match *self {
            EndBound::Inclusive(end) => ts <= end,
            EndBound::Exclusive(end) => ts < end,
        }
    }
}

/// Conjunction of optional sale predicates plus offset/limit pagination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleFilter {
    pub start: Option<NaiveDateTime>,
    pub end: Option<EndBound>,
    pub product_id: Option<i64>,
    pub category_id: Option<i64>,
    pub platform: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl SaleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sales at or after `start`
    pub fn from(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Sales at or before `end`
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(EndBound::Inclusive(end));
        self
    }

    /// Sales strictly before `end`
    pub fn before(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(EndBound::Exclusive(end));
        self
    }

    pub fn product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Sales of products in a category (join through products)
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn paginate(mut self, offset: u32, limit: u32) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Whether the date range can match anything at all
    pub fn is_empty_range(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => !end.admits(start),
            _ => false,
        }
    }
}

/// Read access to persisted sales
pub trait SaleStore {
    /// Sales matching every predicate set on `filter`
    fn query(&self, filter: &SaleFilter) -> Result<Vec<SaleRecord>>;

    /// Sales whose timestamp falls in calendar `year` (and `month`, if given)
    fn query_by_year_month(&self, year: i32, month: Option<u32>) -> Result<Vec<SaleRecord>>;
}
