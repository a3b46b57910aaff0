//! Summary reduction shared by the bucketer and the comparator

use super::store::SaleRecord;
use serde::{Deserialize, Serialize};

/// Count, revenue and quantity over a set of sales
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SaleTotals {
    pub count: u64,
    pub revenue: f64,
    pub quantity: i64,
}

/// Reduce a sequence of sales to its totals. An empty input yields zeros.
pub fn reduce<'a, I>(records: I) -> SaleTotals
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    records
        .into_iter()
        .fold(SaleTotals::default(), |mut totals, record| {
            totals.count += 1;
            totals.revenue += record.total_price;
            totals.quantity += record.quantity;
            totals
        })
}

/// Aggregate for one labelled period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: String,
    pub total_sales: u64,
    pub total_revenue: f64,
    pub products_sold: i64,
}

impl PeriodSummary {
    pub fn new(period: impl Into<String>, totals: SaleTotals) -> Self {
        Self {
            period: period.into(),
            total_sales: totals.count,
            total_revenue: totals.revenue,
            products_sold: totals.quantity,
        }
    }
}

/// Two period summaries and the revenue change between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub period1: PeriodSummary,
    pub period2: PeriodSummary,
    pub change_percentage: f64,
}

/// Relative revenue change from `before` to `after`, in percent.
///
/// Zero when `before` is not positive.
pub fn change_percentage(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        (after - before) / before * 100.0
    } else {
        0.0
    }
}
