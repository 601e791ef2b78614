//! Chart command: zero-filled per-day series with text bars.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use att_client::Client;
use att_core::{
    BucketInterval, ClockEvent, EventSeries, bucketize, format_minutes, reconstruct,
};

pub async fn run<W: Write>(writer: &mut W, client: &Client, month: bool, json: bool) -> Result<()> {
    let events = client
        .events()
        .await
        .context("failed to fetch clock events")?;
    let interval = if month {
        BucketInterval::Month
    } else {
        BucketInterval::Week
    };
    render(writer, events, interval, json, Utc::now())
}

/// Renders the day series from an already-fetched snapshot.
fn render<W: Write>(
    writer: &mut W,
    events: Vec<ClockEvent>,
    interval: BucketInterval,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let series = EventSeries::from_events(events, now);
    let sessions = reconstruct(&series);
    let buckets = bucketize(&sessions, interval, now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&buckets)?)?;
        return Ok(());
    }

    writeln!(writer, "ACTIVITY: {interval}")?;
    let max = buckets.iter().map(|b| b.minutes).max().unwrap_or(0);
    for bucket in &buckets {
        writeln!(
            writer,
            "{}  {:>7}  {}",
            bucket.date.format("%Y-%m-%d"),
            format_minutes(bucket.minutes),
            minutes_bar(bucket.minutes, max)
        )?;
    }

    Ok(())
}

/// Generates a 10-character bar. Non-zero values below 5% of max still get
/// a single block so small days stay visible.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn minutes_bar(value: i64, max: i64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
