//! Period-over-period comparison
//!
//! Both ranges are inclusive at each end, unlike the day/week buckets.

use super::store::{SaleFilter, SaleStore};
use super::summary::{change_percentage, reduce, ComparisonResult, PeriodSummary, SaleTotals};
use crate::error::Result;
use chrono::NaiveDateTime;

/// An inclusive `[start, end]` timestamp range.
///
/// `start > end` is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `"{start date} to {end date}"`
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    fn filter(&self) -> SaleFilter {
        SaleFilter::new().from(self.start).until(self.end)
    }
}

/// Summarize each range and the revenue change from the first to the second
pub fn compare<S>(store: &S, period1: DateRange, period2: DateRange) -> Result<ComparisonResult>
where
    S: SaleStore + ?Sized,
{
    let first = summarize_range(store, &period1)?;
    let second = summarize_range(store, &period2)?;
    let change = change_percentage(first.total_revenue, second.total_revenue);

    tracing::debug!(
        "Compared {} ({:.2}) with {} ({:.2}): {:.2}%",
        first.period,
        first.total_revenue,
        second.period,
        second.total_revenue,
        change
    );

    Ok(ComparisonResult {
        period1: first,
        period2: second,
        change_percentage: change,
    })
}

fn summarize_range<S>(store: &S, range: &DateRange) -> Result<PeriodSummary>
where
    S: SaleStore + ?Sized,
{
    let filter = range.filter();
    let totals = if filter.is_empty_range() {
        SaleTotals::default()
    } else {
        reduce(&store.query(&filter)?)
    };
    Ok(PeriodSummary::new(range.label(), totals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{at, MemoryStore};

    #[test]
    fn test_month_over_month_change() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 60.0, at(2024, 1, 3, 9));
        store.push(1, 1, 40.0, at(2024, 1, 30, 9));
        store.push(2, 3, 150.0, at(2024, 2, 14, 9));

        let result = compare(
            &store,
            DateRange::new(at(2024, 1, 1, 0), at(2024, 1, 31, 0)),
            DateRange::new(at(2024, 2, 1, 0), at(2024, 2, 29, 0)),
        )
        .unwrap();

        assert_eq!(result.period1.period, "2024-01-01 to 2024-01-31");
        assert_eq!(result.period1.total_sales, 2);
        assert_eq!(result.period1.total_revenue, 100.0);
        assert_eq!(result.period2.period, "2024-02-01 to 2024-02-29");
        assert_eq!(result.period2.total_revenue, 150.0);
        assert_eq!(result.period2.products_sold, 3);
        assert_eq!(result.change_percentage, 50.0);
    }

    #[test]
    fn test_range_ends_are_inclusive() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 10.0, at(2024, 1, 1, 0));
        store.push(1, 1, 10.0, at(2024, 1, 31, 0));

        let range = DateRange::new(at(2024, 1, 1, 0), at(2024, 1, 31, 0));
        let result = compare(&store, range, range).unwrap();
        assert_eq!(result.period1.total_sales, 2);
    }

    #[test]
    fn test_zero_base_revenue_means_zero_change() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 500.0, at(2024, 2, 10, 0));

        let result = compare(
            &store,
            DateRange::new(at(2024, 1, 1, 0), at(2024, 1, 31, 0)),
            DateRange::new(at(2024, 2, 1, 0), at(2024, 2, 29, 0)),
        )
        .unwrap();

        assert_eq!(result.period1.total_revenue, 0.0);
        assert_eq!(result.period2.total_revenue, 500.0);
        assert_eq!(result.change_percentage, 0.0);
    }

    #[test]
    fn test_reversed_range_yields_zero_summary() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 10.0, at(2024, 1, 15, 0));

        let result = compare(
            &store,
            DateRange::new(at(2024, 1, 31, 0), at(2024, 1, 1, 0)),
            DateRange::new(at(2024, 1, 1, 0), at(2024, 1, 31, 0)),
        )
        .unwrap();

        assert_eq!(result.period1.total_sales, 0);
        assert_eq!(result.period1.period, "2024-01-31 to 2024-01-01");
        assert_eq!(result.period2.total_sales, 1);
        assert_eq!(result.change_percentage, 0.0);
    }
}
