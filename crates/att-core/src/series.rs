//! Validated, time-ordered event series for a single user.

use chrono::{DateTime, Duration, Utc};

use crate::event::ClockEvent;

/// Clock-skew tolerance before a future-dated event is flagged.
const FUTURE_SKEW_TOLERANCE_MINUTES: i64 = 5;

/// A time-ordered sequence of clock events for one user.
///
/// Construction sorts ascending by timestamp. The sort is stable, so events
/// sharing a timestamp keep their arrival order. Events dated in the future
/// beyond [`FUTURE_SKEW_TOLERANCE_MINUTES`] are kept but logged; rejecting
/// them would drop real punches from skewed clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSeries {
    events: Vec<ClockEvent>,
}

impl EventSeries {
    /// Builds a series from events in arbitrary order.
    ///
    /// Pure apart from a `warn` log per future-dated event.
    #[must_use]
    pub fn from_events(mut events: Vec<ClockEvent>, now: DateTime<Utc>) -> Self {
        events.sort_by_key(|e| e.timestamp);

        let horizon = now + Duration::minutes(FUTURE_SKEW_TOLERANCE_MINUTES);
        for event in events.iter().filter(|e| e.timestamp > horizon) {
            tracing::warn!(
                id = %event.id,
                timestamp = %event.timestamp,
                "event is future-dated beyond skew tolerance; keeping it"
            );
        }

        Self { events }
    }

    /// The events, sorted ascending by timestamp.
    #[must_use]
    pub fn events(&self) -> &[ClockEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
