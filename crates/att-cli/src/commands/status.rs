//! Status command: current clock state plus today's total.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use att_client::Client;
use att_core::{
    AttendancePolicy, ClockKind, EventSeries, WorkSession, day_totals, format_minutes, reconstruct,
};

pub async fn run<W: Write>(
    writer: &mut W,
    client: &Client,
    policy: &AttendancePolicy,
) -> Result<()> {
    let state = client
        .status()
        .await
        .context("failed to fetch clock status")?;
    let events = client
        .day_events()
        .await
        .context("failed to fetch today's events")?;

    let now = Utc::now();
    let series = EventSeries::from_events(events, now);
    let sessions = reconstruct(&series);
    render(writer, state, &sessions, policy, now)
}

/// Renders the status block from an already-fetched snapshot.
fn render<W: Write>(
    writer: &mut W,
    state: ClockKind,
    sessions: &[WorkSession],
    policy: &AttendancePolicy,
    now: DateTime<Utc>,
) -> Result<()> {
    let today = now.date_naive();
    let total = day_totals(sessions, now)
        .get(&today)
        .copied()
        .unwrap_or(0);

    writeln!(writer, "Clock state: {state}")?;
    writeln!(
        writer,
        "Today: {} ({})",
        format_minutes(total),
        policy.classify(total)
    )?;

    if let Some(open) = sessions.iter().rev().find(|s| s.is_open()) {
        writeln!(
            writer,
            "Open session since {}",
            open.start.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    Ok(())
}
