//! Core attendance computation engine.
//!
//! Turns a raw, append-only log of clock-in/clock-out events into:
//! - session intervals ([`session`])
//! - per-day and per-period duration summaries ([`aggregate`])
//! - attendance classifications ([`classify`])
//! - zero-filled chart series ([`bucket`])
//! - a live elapsed display for the open session ([`tracker`])
//!
//! Everything here is pure: events arrive from the outside (see the
//! `att-client` crate), "now" is always an explicit parameter, and no
//! state is persisted. Staleness is resolved by re-fetching and
//! recomputing, never by locking.

pub mod aggregate;
pub mod bucket;
pub mod classify;
pub mod event;
pub mod series;
pub mod session;
pub mod tracker;
pub mod types;

pub use aggregate::{
    DayAggregate, PeriodSummary, PeriodTotal, day_aggregates, day_totals, format_minutes,
    summarize,
};
pub use bucket::{BucketInterval, DayBucket, bucketize};
pub use classify::{AttendancePolicy, AttendanceStatus};
pub use event::{ClockEvent, ClockKind};
pub use series::EventSeries;
pub use session::{PairingOutcome, WorkSession, pair_events, reconstruct};
pub use tracker::{Tracker, TrackerState, format_elapsed};
pub use types::{EventId, UserId, ValidationError};
