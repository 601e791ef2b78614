//! Clock command: record an IN/OUT punch.

use std::io::Write;

use anyhow::{Context, Result};

use att_client::Client;
use att_core::ClockKind;

/// Submits the punch and reports the backend's new clock state.
///
/// On failure nothing is recorded anywhere; the error carries the
/// backend's message and the user simply resubmits.
pub async fn run<W: Write>(writer: &mut W, client: &Client, kind: ClockKind) -> Result<()> {
    let state = client
        .clock(kind)
        .await
        .context("failed to record clock punch")?;

    writeln!(writer, "Clock state: {state}")?;
    if state == ClockKind::In {
        writeln!(writer, "Hint: run 'att watch' for a live elapsed display.")?;
    }

    Ok(())
}
