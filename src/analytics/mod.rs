//! Sales analytics engine
//!
//! Buckets sale records into daily, weekly, monthly and annual summaries and
//! compares arbitrary date ranges. Everything here reads through the
//! [`SaleStore`] trait and holds no state between calls.

pub mod bucketer;
pub mod comparator;
pub mod period;
pub mod store;
pub mod summary;

#[cfg(test)]
mod testing;

pub use bucketer::bucket;
pub use comparator::{compare, DateRange};
pub use period::{month_offset, Granularity, Period, PeriodSpan};
pub use store::{EndBound, SaleFilter, SaleRecord, SaleStore};
pub use summary::{change_percentage, reduce, ComparisonResult, PeriodSummary, SaleTotals};
