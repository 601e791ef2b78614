//! Raw clock events: the IN/OUT punches recorded for one user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, UserId};

/// Direction of a clock punch.
///
/// The wire strings are the backend's uppercase `"IN"` / `"OUT"`; this enum
/// is the single source of truth for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockKind {
    In,
    Out,
}

impl ClockKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockKind {
    type Err = UnknownClockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(UnknownClockKind(s.to_string())),
        }
    }
}

impl Serialize for ClockKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClockKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown clock direction strings.
#[derive(Debug, Clone)]
pub struct UnknownClockKind(String);

impl fmt::Display for UnknownClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown clock direction: {}", self.0)
    }
}

impl std::error::Error for UnknownClockKind {}

/// A single clock punch, created only by the backend's clock mutation
/// endpoint and never mutated or deleted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockEvent {
    /// Server-assigned identifier; opaque, not ordering-correlated.
    pub id: EventId,
    /// Owner of the punch.
    pub user_id: UserId,
    /// Punch direction.
    #[serde(rename = "type")]
    pub kind: ClockKind,
    /// Absolute instant of the punch.
    pub timestamp: DateTime<Utc>,
}
