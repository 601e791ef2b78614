//! Live elapsed tracking for the currently open session.
//!
//! The state machine here is pure; the periodic tick that re-renders the
//! display belongs to the host (see the CLI's watch command), which must
//! cancel it when the session closes or the view goes away.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::session::WorkSession;

/// Tracker state. No terminal state: the machine cycles between active and
/// inactive for as long as the user keeps clocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Inactive,
    Active {
        since: DateTime<Utc>,
    },
    /// Display-only overlay on an active session. Breaks are not distinct
    /// events in the log, so this state changes nothing about duration
    /// math or session boundaries. Known gap: time on break still counts.
    OnBreak {
        since: DateTime<Utc>,
    },
}

/// Elapsed-time tracker for the open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tracker {
    state: TrackerState,
}

impl Tracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TrackerState::Inactive,
        }
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, TrackerState::Inactive)
    }

    /// Anchors to a successful clock-IN at `at`.
    pub fn clock_in(&mut self, at: DateTime<Utc>) {
        self.state = TrackerState::Active { since: at };
    }

    /// Returns to inactive after a successful clock-OUT; legal from either
    /// active state.
    pub fn clock_out(&mut self) {
        self.state = TrackerState::Inactive;
    }

    /// Marks the active session as on break. No-op while inactive.
    pub fn break_start(&mut self) {
        if let TrackerState::Active { since } = self.state {
            self.state = TrackerState::OnBreak { since };
        }
    }

    /// Clears the break overlay. No-op unless on break.
    pub fn break_end(&mut self) {
        if let TrackerState::OnBreak { since } = self.state {
            self.state = TrackerState::Active { since };
        }
    }

    /// Re-anchors after a reload: adopts the open session attributed to
    /// `today`, reconstructed from the event log rather than any
    /// client-persisted timestamp. Goes inactive when none exists.
    pub fn resume(&mut self, sessions: &[WorkSession], today: NaiveDate) {
        self.state = sessions
            .iter()
            .rev()
            .find(|s| s.is_open() && s.day_key() == today)
            .map_or(TrackerState::Inactive, |s| TrackerState::Active {
                since: s.start,
            });
    }

    /// Elapsed time of the tracked session; zero while inactive, clamped
    /// at zero against clock skew.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            TrackerState::Inactive => Duration::zero(),
            TrackerState::Active { since } | TrackerState::OnBreak { since } => {
                (now - since).max(Duration::zero())
            }
        }
    }

    /// `HH:MM:SS` display of the elapsed time.
    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_elapsed(self.elapsed(now))
    }
}

/// Formats a duration as zero-padded `HH:MM:SS`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, total % 3600 / 60, total % 60)
}
