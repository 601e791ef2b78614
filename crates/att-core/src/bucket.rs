//! Zero-filled per-day series for charts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::aggregate::{day_totals, month_bounds, week_bounds};
use crate::session::WorkSession;

/// Charting interval, anchored to "now" at bucketize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketInterval {
    /// The 7 days of the Monday-start week containing now.
    #[default]
    Week,
    /// Every day of the calendar month containing now.
    Month,
}

impl BucketInterval {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for BucketInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("invalid interval: {s}")),
        }
    }
}

/// One chart point: a calendar day and its worked minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// Produces one bucket per calendar day of the interval containing `now`,
/// in chronological order. Days without recorded activity appear with
/// `minutes = 0` rather than being omitted, so the output feeds a
/// time-series chart directly.
#[must_use]
pub fn bucketize(
    sessions: &[WorkSession],
    interval: BucketInterval,
    now: DateTime<Utc>,
) -> Vec<DayBucket> {
    let today = now.date_naive();
    let (start, end) = match interval {
        BucketInterval::Week => week_bounds(today),
        BucketInterval::Month => month_bounds(today),
    };

    let totals = day_totals(sessions, now);
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DayBucket {
            date,
            minutes: totals.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
