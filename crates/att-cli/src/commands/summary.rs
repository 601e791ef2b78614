//! Summary command: today / this-week / this-month totals.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use att_client::Client;
use att_core::{ClockEvent, EventSeries, reconstruct, summarize};

pub async fn run<W: Write>(writer: &mut W, client: &Client, json: bool) -> Result<()> {
    let events = client
        .events()
        .await
        .context("failed to fetch clock events")?;
    render(writer, events, json, Utc::now())
}

/// Renders the period summary from an already-fetched snapshot.
///
/// Summaries including an open session are only valid as of `now`; each
/// invocation recomputes from the event list rather than caching.
fn render<W: Write>(
    writer: &mut W,
    events: Vec<ClockEvent>,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let series = EventSeries::from_events(events, now);
    let sessions = reconstruct(&series);
    let summary = summarize(&sessions, now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(writer, "PERIOD SUMMARY")?;
        writeln!(writer, "Today:      {}", summary.today.label)?;
        writeln!(writer, "This week:  {}", summary.this_week.label)?;
        writeln!(writer, "This month: {}", summary.this_month.label)?;
    }

    Ok(())
}
