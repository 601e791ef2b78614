//! Watch command: live elapsed display for today's open session.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use att_client::Client;
use att_core::{EventSeries, Tracker, reconstruct};

/// Tick cadence for the live display.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Reconstructs the open session from the event log (never from any
/// locally persisted anchor) and re-renders its elapsed time every second
/// until ctrl-c tears the view down.
pub async fn run<W: Write>(writer: &mut W, client: &Client) -> Result<()> {
    let events = client
        .day_events()
        .await
        .context("failed to fetch today's events")?;

    let now = Utc::now();
    let series = EventSeries::from_events(events, now);
    let sessions = reconstruct(&series);

    let mut tracker = Tracker::new();
    tracker.resume(&sessions, now.date_naive());
    if !tracker.is_active() {
        writeln!(writer, "No open session today.")?;
        return Ok(());
    }

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    tick_loop(writer, &tracker, &token).await
}

/// Re-renders the elapsed display once per tick until cancelled.
///
/// The token bounds the recurring work to "session open and view active":
/// teardown cancels the loop instead of leaving it ticking, and a tick
/// that loses the race with cancellation must not touch the display.
async fn tick_loop<W: Write>(
    writer: &mut W,
    tracker: &Tracker,
    token: &CancellationToken,
) -> Result<()> {
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    loop {
        tokio::select! {
            () = token.cancelled() => {
                writeln!(writer)?;
                return Ok(());
            }
            _ = ticker.tick() => {
                if token.is_cancelled() {
                    continue;
                }
                write!(writer, "\r{}", tracker.display(Utc::now()))?;
                writer.flush()?;
            }
        }
    }
}
