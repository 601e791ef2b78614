//! Session reconstruction: folding a sorted event series into work intervals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::event::{ClockEvent, ClockKind};
use crate::series::EventSeries;

/// A derived work interval. Never persisted; recomputed on demand from the
/// current event series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkSession {
    /// Timestamp of the opening IN punch.
    pub start: DateTime<Utc>,
    /// Timestamp of the closing OUT punch; `None` while the session is open.
    pub end: Option<DateTime<Utc>>,
}

impl WorkSession {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Calendar date (UTC) the session is attributed to: the date of
    /// `start`. Sessions are never split across midnight, so a shift that
    /// ends after midnight counts wholly toward its start date.
    #[must_use]
    pub fn day_key(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Whole minutes worked. Open sessions are measured against `now` and
    /// grow on every read. Negative spans from clock skew clamp to zero so
    /// they never reach the aggregates.
    #[must_use]
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end.unwrap_or(now);
        (end - self.start).num_minutes().max(0)
    }
}

/// Tagged outcome of one step of the pairing fold.
///
/// The tags keep the absorbed cases observable in tests without surfacing
/// them as errors to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingOutcome {
    /// An IN punch met the OUT punch immediately after it.
    Paired(WorkSession),
    /// A trailing IN with no OUT yet: the open session.
    OpenTail(WorkSession),
    /// An event the walk cannot pair: an OUT with no unmatched IN before
    /// it, or an IN displaced by the IN right after it. Absorbed silently,
    /// contributing no session and no error.
    OrphanSkip(ClockEvent),
}

/// Walks the sorted series with a one-event lookahead, pairing adjacent
/// IN/OUT punches.
///
/// - `IN` followed by `OUT` emits a closed session and advances past both.
/// - A trailing unmatched `IN` becomes the open session.
/// - A lone `OUT` is skipped; two consecutive `IN`s orphan the first and
///   pairing resumes from the second.
#[must_use]
pub fn pair_events(series: &EventSeries) -> Vec<PairingOutcome> {
    let events = series.events();
    let mut outcomes = Vec::with_capacity(events.len() / 2 + 1);

    let mut i = 0;
    while i < events.len() {
        let event = &events[i];
        match event.kind {
            ClockKind::In => match events.get(i + 1) {
                Some(next) if next.kind == ClockKind::Out => {
                    outcomes.push(PairingOutcome::Paired(WorkSession {
                        start: event.timestamp,
                        end: Some(next.timestamp),
                    }));
                    i += 2;
                }
                Some(_) => {
                    tracing::warn!(id = %event.id, "IN displaced by a later IN; skipping");
                    outcomes.push(PairingOutcome::OrphanSkip(event.clone()));
                    i += 1;
                }
                None => {
                    outcomes.push(PairingOutcome::OpenTail(WorkSession {
                        start: event.timestamp,
                        end: None,
                    }));
                    i += 1;
                }
            },
            ClockKind::Out => {
                tracing::warn!(id = %event.id, "OUT with no preceding IN; skipping");
                outcomes.push(PairingOutcome::OrphanSkip(event.clone()));
                i += 1;
            }
        }
    }

    outcomes
}

/// Reconstructs the ordered session list, dropping the absorbed orphans.
#[must_use]
pub fn reconstruct(series: &EventSeries) -> Vec<WorkSession> {
    pair_events(series)
        .into_iter()
        .filter_map(|outcome| match outcome {
            PairingOutcome::Paired(session) | PairingOutcome::OpenTail(session) => Some(session),
            PairingOutcome::OrphanSkip(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::types::{EventId, UserId};

    fn event(id: &str, kind: ClockKind, ts: DateTime<Utc>) -> ClockEvent {
        ClockEvent {
            id: EventId::new(id).unwrap(),
            user_id: UserId::new("user-1").unwrap(),
            kind,
            timestamp: ts,
        }
    }

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn series(events: Vec<ClockEvent>) -> EventSeries {
        EventSeries::from_events(events, ts(24 * 60))
    }

    #[test]
    fn pairs_alternating_events() {
        // 09:00 IN, 12:00 OUT, 13:00 IN, 17:30 OUT
        let s = series(vec![
            event("1", ClockKind::In, ts(0)),
            event("2", ClockKind::Out, ts(180)),
            event("3", ClockKind::In, ts(240)),
            event("4", ClockKind::Out, ts(510)),
        ]);

        let sessions = reconstruct(&s);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].duration_minutes(ts(600)), 180);
        assert_eq!(sessions[1].duration_minutes(ts(600)), 270);
        assert!(sessions.iter().all(|s| !s.is_open()));
    }

    #[test]
    fn trailing_in_becomes_open_session() {
        let s = series(vec![event("1", ClockKind::In, ts(0))]);

        let sessions = reconstruct(&s);
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].is_open());

        // 09:00 IN evaluated at 11:15 is 135 minutes, and strictly grows.
        assert_eq!(sessions[0].duration_minutes(ts(135)), 135);
        assert!(sessions[0].duration_minutes(ts(136)) > sessions[0].duration_minutes(ts(135)));
    }

    #[test]
    fn lone_leading_out_is_skipped() {
        // OUT 09:00, IN 10:00, OUT 11:00: the leading OUT contributes
        // nothing and exactly one 60-minute session remains.
        let s = series(vec![
            event("1", ClockKind::Out, ts(0)),
            event("2", ClockKind::In, ts(60)),
            event("3", ClockKind::Out, ts(120)),
        ]);

        let outcomes = pair_events(&s);
        assert!(matches!(
            outcomes[0],
            PairingOutcome::OrphanSkip(ref e) if e.id.as_str() == "1"
        ));

        let sessions = reconstruct(&s);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duration_minutes(ts(180)), 60);
    }

    #[test]
    fn consecutive_outs_are_both_handled() {
        let s = series(vec![
            event("1", ClockKind::In, ts(0)),
            event("2", ClockKind::Out, ts(60)),
            event("3", ClockKind::Out, ts(70)),
        ]);

        let sessions = reconstruct(&s);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].end, Some(ts(60)));
    }

    #[test]
    fn doubled_in_orphans_the_first() {
        // The first IN is displaced; pairing resumes from the second,
        // which closes against the OUT.
        let s = series(vec![
            event("1", ClockKind::In, ts(0)),
            event("2", ClockKind::In, ts(30)),
            event("3", ClockKind::Out, ts(90)),
        ]);

        let outcomes = pair_events(&s);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0],
            PairingOutcome::OrphanSkip(ref e) if e.id.as_str() == "1"
        ));

        let sessions = reconstruct(&s);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start, ts(30));
        assert_eq!(sessions[0].end, Some(ts(90)));
    }

    #[test]
    fn empty_series_yields_no_sessions() {
        let s = series(Vec::new());
        assert!(pair_events(&s).is_empty());
        assert!(reconstruct(&s).is_empty());
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        // Clock skew: an open session anchored after "now".
        let open = WorkSession {
            start: ts(60),
            end: None,
        };
        assert_eq!(open.duration_minutes(ts(0)), 0);
    }

    #[test]
    fn day_key_is_the_start_date() {
        // A shift crossing midnight attributes wholly to its start date.
        let session = WorkSession {
            start: Utc.with_ymd_and_hms(2025, 6, 2, 22, 0, 0).unwrap(),
            end: Some(Utc.with_ymd_and_hms(2025, 6, 3, 2, 0, 0).unwrap()),
        };
        assert_eq!(
            session.day_key(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert_eq!(session.duration_minutes(ts(0)), 240);
    }

    #[test]
    fn pairing_is_idempotent() {
        let events = vec![
            event("1", ClockKind::In, ts(0)),
            event("2", ClockKind::Out, ts(180)),
            event("3", ClockKind::In, ts(240)),
        ];
        let s = series(events);

        assert_eq!(pair_events(&s), pair_events(&s));
        assert_eq!(reconstruct(&s), reconstruct(&s));
    }
}
