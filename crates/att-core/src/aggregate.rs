//! Duration aggregation: per-day totals and period summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::classify::{AttendancePolicy, AttendanceStatus};
use crate::session::WorkSession;

/// Sums session minutes per attributed calendar date.
///
/// Open sessions are measured against `now`, so totals that include one are
/// only valid as of that instant and must be recomputed on each read.
#[must_use]
pub fn day_totals(sessions: &[WorkSession], now: DateTime<Utc>) -> BTreeMap<NaiveDate, i64> {
    let mut totals = BTreeMap::new();
    for session in sessions {
        *totals.entry(session.day_key()).or_insert(0) += session.duration_minutes(now);
    }
    totals
}

/// One calendar day's total with its attendance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total_minutes: i64,
    pub status: AttendanceStatus,
}

/// Per-day aggregates in date order, classified against `policy`.
#[must_use]
pub fn day_aggregates(
    sessions: &[WorkSession],
    policy: &AttendancePolicy,
    now: DateTime<Utc>,
) -> Vec<DayAggregate> {
    day_totals(sessions, now)
        .into_iter()
        .map(|(date, total_minutes)| DayAggregate {
            date,
            total_minutes,
            status: policy.classify(total_minutes),
        })
        .collect()
}

/// One period's total, pre-rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    /// `"{H}h {M}m"` with integer truncation.
    pub label: String,
    /// Fractional hours, for chart consumers.
    pub hours: f64,
}

impl PeriodTotal {
    #[allow(clippy::cast_precision_loss)]
    fn from_minutes(minutes: i64) -> Self {
        Self {
            label: format_minutes(minutes),
            hours: minutes as f64 / 60.0,
        }
    }
}

/// Today / this-week / this-month totals, valid as of the `now` they were
/// computed at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub today: PeriodTotal,
    pub this_week: PeriodTotal,
    pub this_month: PeriodTotal,
}

/// First and last day (inclusive) of the Monday-start week containing `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

/// First and last day (inclusive) of the calendar month containing `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap();
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap();
    (first, next_month - Duration::days(1))
}

/// Computes the day/week/month summary as of `now`.
///
/// An open session attributed to today is included at its live value, so
/// callers recompute on every read rather than cache.
#[must_use]
pub fn summarize(sessions: &[WorkSession], now: DateTime<Utc>) -> PeriodSummary {
    let totals = day_totals(sessions, now);
    let today = now.date_naive();
    let (week_start, week_end) = week_bounds(today);
    let (month_start, month_end) = month_bounds(today);

    let sum_range = |from: NaiveDate, to: NaiveDate| -> i64 {
        totals.range(from..=to).map(|(_, minutes)| minutes).sum()
    };

    PeriodSummary {
        today: PeriodTotal::from_minutes(totals.get(&today).copied().unwrap_or(0)),
        this_week: PeriodTotal::from_minutes(sum_range(week_start, week_end)),
        this_month: PeriodTotal::from_minutes(sum_range(month_start, month_end)),
    }
}

/// Formats minutes as `"{H}h {M}m"`, truncating toward zero.
/// Negative totals render as zero.
#[must_use]
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}
