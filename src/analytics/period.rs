//! Calendar periods used for bucketing
//!
//! Day and week buckets are half-open date ranges `[start, end)`. Month and
//! year buckets match on the calendar components of the sale timestamp.

use crate::error::AppError;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Number of periods emitted when the caller does not say
    pub fn default_count(self) -> u32 {
        match self {
            Granularity::Day => 7,
            Granularity::Week => 4,
            Granularity::Month => 6,
            Granularity::Year => 3,
        }
    }

    /// Name of the count parameter on the HTTP surface
    pub fn count_param(self) -> &'static str {
        match self {
            Granularity::Day => "days",
            Granularity::Week => "weeks",
            Granularity::Month => "months",
            Granularity::Year => "years",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "annual" | "yearly" => Ok(Granularity::Year),
            other => Err(AppError::Validation(format!("unknown granularity: {}", other))),
        }
    }
}

/// What a single bucket selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSpan {
    /// `[start, end)` at day precision
    Range { start: NaiveDate, end: NaiveDate },
    Month { year: i32, month: u32 },
    Year(i32),
}

/// A labelled bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub label: String,
    pub span: PeriodSpan,
}

/// Step `offset` months back from `year`-`month`, rolling the year over as
/// needed. `month` is 1-based.
pub fn month_offset(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let mut target_year = year;
    let mut target_month = month as i64 - offset as i64;
    let years_back = if target_month <= 0 {
        (-target_month) / 12 + 1
    } else {
        0
    };
    target_month += years_back * 12;
    target_year -= years_back as i32;
    (target_year, target_month as u32)
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The `count` periods ending at `today`, most recent first.
///
/// Periods that would fall outside the representable calendar are dropped.
pub fn periods(granularity: Granularity, count: u32, today: NaiveDate) -> Vec<Period> {
    (0..count)
        .map_while(|i| match granularity {
            Granularity::Day => {
                let start = today.checked_sub_days(Days::new(i as u64))?;
                let end = start.checked_add_days(Days::new(1))?;
                Some(Period {
                    label: start.format("%Y-%m-%d").to_string(),
                    span: PeriodSpan::Range { start, end },
                })
            }
            Granularity::Week => {
                let end = today.checked_sub_days(Days::new(i as u64 * 7))?;
                let start = end.checked_sub_days(Days::new(7))?;
                Some(Period {
                    label: format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
                    span: PeriodSpan::Range { start, end },
                })
            }
            Granularity::Month => {
                let (year, month) = month_offset(today.year(), today.month(), i);
                Some(Period {
                    label: format!("{}-{:02}", year, month),
                    span: PeriodSpan::Month { year, month },
                })
            }
            Granularity::Year => {
                let year = today.year().checked_sub(i32::try_from(i).ok()?)?;
                Some(Period {
                    label: year.to_string(),
                    span: PeriodSpan::Year(year),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_offset_same_year() {
        assert_eq!(month_offset(2024, 6, 0), (2024, 6));
        assert_eq!(month_offset(2024, 6, 5), (2024, 1));
    }

    #[test]
    fn test_month_offset_rollover() {
        assert_eq!(month_offset(2024, 1, 1), (2023, 12));
        assert_eq!(month_offset(2024, 3, 3), (2023, 12));
        assert_eq!(month_offset(2024, 3, 14), (2023, 1));
        assert_eq!(month_offset(2024, 3, 15), (2022, 12));
        assert_eq!(month_offset(2024, 12, 24), (2022, 12));
    }

    #[test]
    fn test_daily_periods() {
        let periods = periods(Granularity::Day, 3, date(2024, 3, 1));
        let labels: Vec<_> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-03-01", "2024-02-29", "2024-02-28"]);
        assert_eq!(
            periods[1].span,
            PeriodSpan::Range { start: date(2024, 2, 29), end: date(2024, 3, 1) }
        );
    }

    #[test]
    fn test_weekly_periods() {
        let periods = periods(Granularity::Week, 2, date(2024, 1, 15));
        assert_eq!(periods[0].label, "2024-01-08 to 2024-01-15");
        assert_eq!(periods[1].label, "2024-01-01 to 2024-01-08");
        assert_eq!(
            periods[1].span,
            PeriodSpan::Range { start: date(2024, 1, 1), end: date(2024, 1, 8) }
        );
    }

    #[test]
    fn test_monthly_periods_cross_year() {
        let periods = periods(Granularity::Month, 3, date(2024, 2, 10));
        let labels: Vec<_> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-01", "2023-12"]);
        assert_eq!(periods[2].span, PeriodSpan::Month { year: 2023, month: 12 });
    }

    #[test]
    fn test_yearly_periods() {
        let periods = periods(Granularity::Year, 3, date(2024, 7, 4));
        let labels: Vec<_> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024", "2023", "2022"]);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(periods(Granularity::Day, 0, date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("Month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("annual".parse::<Granularity>().unwrap(), Granularity::Year);
        assert!("hourly".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Week.default_count(), 4);
    }
}
