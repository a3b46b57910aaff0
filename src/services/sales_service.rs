//! Sales Service
//!
//! Recording, listing and analysing sales. Each call checks out a single
//! connection and runs the analytics engine over it.

use crate::analytics::{
    bucket, compare, ComparisonResult, DateRange, Granularity, PeriodSummary, SaleFilter,
    SaleRecord,
};
use crate::db::sqlite::{sales, NewSale, SaleDetail};
use crate::error::{AppError, Result};
use crate::state::AppState;
use tracing::info;

/// Sales service for business logic
pub struct SalesService;

impl SalesService {
    /// Summaries for the most recent `count` periods, newest first.
    ///
    /// `count` defaults per granularity and must lie in `1..=max_periods`.
    pub fn summarize(
        state: &AppState,
        granularity: Granularity,
        count: Option<u32>,
    ) -> Result<Vec<PeriodSummary>> {
        let count = Self::resolve_count(state, granularity, count)?;
        info!("SalesService::summarize - {} x{}", granularity, count);

        let conn = state.db.conn()?;
        bucket(&*conn, granularity, count, state.today())
    }

    /// Compare two inclusive date ranges
    pub fn compare(
        state: &AppState,
        period1: DateRange,
        period2: DateRange,
    ) -> Result<ComparisonResult> {
        info!(
            "SalesService::compare - {} vs {}",
            period1.label(),
            period2.label()
        );

        let conn = state.db.conn()?;
        compare(&*conn, period1, period2)
    }

    /// Sales matching an arbitrary predicate set, with products
    pub fn filter(state: &AppState, filter: &SaleFilter) -> Result<Vec<SaleDetail>> {
        let conn = state.db.conn()?;
        sales::filter_sale_details(&conn, filter)
    }

    pub fn list(state: &AppState, offset: u32, limit: u32) -> Result<Vec<SaleDetail>> {
        let conn = state.db.conn()?;
        sales::list_sales(&conn, offset, limit)
    }

    /// Record a sale timestamped now
    pub fn record(state: &AppState, req: &NewSale) -> Result<SaleRecord> {
        let conn = state.db.conn()?;
        let sale = sales::record_sale(&conn, req)?;
        info!(
            "SalesService::record - sale {} for product {}",
            sale.id, sale.product_id
        );
        Ok(sale)
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn resolve_count(state: &AppState, granularity: Granularity, count: Option<u32>) -> Result<u32> {
        let count = count.unwrap_or_else(|| granularity.default_count());
        let max = state.config.max_periods;

        if count == 0 {
            return Err(AppError::Validation(format!(
                "{} must be at least 1",
                granularity.count_param()
            )));
        }
        if count > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {}",
                granularity.count_param(),
                max
            )));
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::db::SqliteDb;

    fn test_state() -> AppState {
        let config = ServerConfig {
            max_periods: 12,
            ..ServerConfig::default()
        };
        AppState::with_db(SqliteDb::in_memory().unwrap(), config)
    }

    #[test]
    fn test_default_counts() {
        let state = test_state();
        assert_eq!(SalesService::summarize(&state, Granularity::Day, None).unwrap().len(), 7);
        assert_eq!(SalesService::summarize(&state, Granularity::Week, None).unwrap().len(), 4);
        assert_eq!(SalesService::summarize(&state, Granularity::Month, None).unwrap().len(), 6);
        assert_eq!(SalesService::summarize(&state, Granularity::Year, None).unwrap().len(), 3);
    }

    #[test]
    fn test_count_bounds() {
        let state = test_state();
        let err = SalesService::summarize(&state, Granularity::Day, Some(0)).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("days")));

        let err = SalesService::summarize(&state, Granularity::Month, Some(13)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(
            SalesService::summarize(&state, Granularity::Month, Some(12)).unwrap().len(),
            12
        );
    }
}
