//! Period bucketer
//!
//! Splits the recent past into `count` calendar periods and summarizes the
//! sales in each one. Buckets are independent of one another.

use super::period::{periods, start_of_day, Granularity, Period, PeriodSpan};
use super::store::{SaleFilter, SaleRecord, SaleStore};
use super::summary::{reduce, PeriodSummary};
use crate::error::Result;
use chrono::NaiveDate;

/// Summaries for the `count` most recent periods ending at `today`, most
/// recent first.
pub fn bucket<S>(
    store: &S,
    granularity: Granularity,
    count: u32,
    today: NaiveDate,
) -> Result<Vec<PeriodSummary>>
where
    S: SaleStore + ?Sized,
{
    let summaries = periods(granularity, count, today)
        .into_iter()
        .map(|period| summarize_period(store, period))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Bucketed {} {} periods ending {}",
        summaries.len(),
        granularity,
        today
    );

    Ok(summaries)
}

fn summarize_period<S>(store: &S, period: Period) -> Result<PeriodSummary>
where
    S: SaleStore + ?Sized,
{
    let sales = fetch_span(store, period.span)?;
    Ok(PeriodSummary::new(period.label, reduce(&sales)))
}

fn fetch_span<S>(store: &S, span: PeriodSpan) -> Result<Vec<SaleRecord>>
where
    S: SaleStore + ?Sized,
{
    match span {
        PeriodSpan::Range { start, end } => store.query(
            &SaleFilter::new()
                .from(start_of_day(start))
                .before(start_of_day(end)),
        ),
        PeriodSpan::Month { year, month } => store.query_by_year_month(year, Some(month)),
        PeriodSpan::Year(year) => store.query_by_year_month(year, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{at, date, MemoryStore};

    #[test]
    fn test_monthly_scenario() {
        let mut store = MemoryStore::new();
        store.push(1, 2, 100.0, at(2024, 1, 5, 10));
        store.push(1, 1, 50.0, at(2024, 1, 20, 15));

        let summaries = bucket(&store, Granularity::Month, 1, date(2024, 1, 31)).unwrap();
        assert_eq!(
            summaries,
            vec![PeriodSummary {
                period: "2024-01".to_string(),
                total_sales: 2,
                total_revenue: 150.0,
                products_sold: 3,
            }]
        );
    }

    #[test]
    fn test_month_rollover_reports_previous_december() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 10.0, at(2023, 12, 31, 23));
        store.push(1, 1, 20.0, at(2024, 1, 1, 0));

        let summaries = bucket(&store, Granularity::Month, 2, date(2024, 1, 15)).unwrap();
        assert_eq!(summaries[0].period, "2024-01");
        assert_eq!(summaries[0].total_revenue, 20.0);
        assert_eq!(summaries[1].period, "2023-12");
        assert_eq!(summaries[1].total_revenue, 10.0);
    }

    #[test]
    fn test_daily_buckets_partition_records() {
        let mut store = MemoryStore::new();
        // One sale at every 6 hours over three days
        for day in 8..=10 {
            for hour in [0, 6, 12, 18] {
                store.push(1, 1, 5.0, at(2024, 3, day, hour));
            }
        }
        // Outside the requested span
        store.push(1, 1, 5.0, at(2024, 3, 11, 0));
        store.push(1, 1, 5.0, at(2024, 3, 7, 23));

        let summaries = bucket(&store, Granularity::Day, 3, date(2024, 3, 10)).unwrap();
        let labels: Vec<_> = summaries.iter().map(|s| s.period.as_str()).collect();
        assert_eq!(labels, vec!["2024-03-10", "2024-03-09", "2024-03-08"]);

        let total: u64 = summaries.iter().map(|s| s.total_sales).sum();
        assert_eq!(total, 12);
        assert!(summaries.iter().all(|s| s.total_sales == 4));
    }

    #[test]
    fn test_weekly_boundary_is_half_open() {
        let mut store = MemoryStore::new();
        store.push(1, 1, 1.0, at(2024, 1, 8, 0));
        store.push(1, 1, 1.0, at(2024, 1, 14, 23));
        // Exactly on the exclusive end of the newest week
        store.push(1, 1, 1.0, at(2024, 1, 15, 0));

        let summaries = bucket(&store, Granularity::Week, 2, date(2024, 1, 15)).unwrap();
        assert_eq!(summaries[0].period, "2024-01-08 to 2024-01-15");
        assert_eq!(summaries[0].total_sales, 2);
        assert_eq!(summaries[1].total_sales, 0);
    }

    #[test]
    fn test_empty_store_yields_zero_summaries() {
        let store = MemoryStore::new();
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            let summaries = bucket(&store, granularity, 2, date(2024, 5, 5)).unwrap();
            assert_eq!(summaries.len(), 2);
            for summary in summaries {
                assert_eq!(summary.total_sales, 0);
                assert_eq!(summary.total_revenue, 0.0);
                assert_eq!(summary.products_sold, 0);
            }
        }
    }

    #[test]
    fn test_annual_buckets() {
        let mut store = MemoryStore::new();
        store.push(1, 3, 30.0, at(2022, 6, 1, 0));
        store.push(1, 1, 10.0, at(2024, 2, 1, 0));
        store.push(1, 2, 20.0, at(2024, 11, 1, 0));

        let summaries = bucket(&store, Granularity::Year, 3, date(2024, 12, 1)).unwrap();
        assert_eq!(summaries[0].period, "2024");
        assert_eq!(summaries[0].total_sales, 2);
        assert_eq!(summaries[0].products_sold, 3);
        assert_eq!(summaries[1].total_sales, 0);
        assert_eq!(summaries[2].total_revenue, 30.0);
    }
}
