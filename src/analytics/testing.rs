//! In-memory sale store for engine tests

use super::store::{SaleFilter, SaleRecord, SaleStore};
use crate::error::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Default)]
pub struct MemoryStore {
    sales: Vec<SaleRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, product_id: i64, quantity: i64, total_price: f64, sale_date: NaiveDateTime) {
        let id = self.sales.len() as i64 + 1;
        self.sales.push(SaleRecord {
            id,
            product_id,
            quantity,
            total_price,
            sale_date,
            platform: None,
        });
    }
}

impl SaleStore for MemoryStore {
    // Category predicates need a product table and are not modelled here.
    fn query(&self, filter: &SaleFilter) -> Result<Vec<SaleRecord>> {
        Ok(self
            .sales
            .iter()
            .filter(|s| filter.start.map_or(true, |start| s.sale_date >= start))
            .filter(|s| filter.end.map_or(true, |end| end.admits(s.sale_date)))
            .filter(|s| filter.product_id.map_or(true, |id| s.product_id == id))
            .filter(|s| {
                filter
                    .platform
                    .as_deref()
                    .map_or(true, |p| s.platform.as_deref() == Some(p))
            })
            .cloned()
            .collect())
    }

    fn query_by_year_month(&self, year: i32, month: Option<u32>) -> Result<Vec<SaleRecord>> {
        Ok(self
            .sales
            .iter()
            .filter(|s| s.sale_date.year() == year)
            .filter(|s| month.map_or(true, |m| s.sale_date.month() == m))
            .cloned()
            .collect())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
