//! Attendance classification of per-day totals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minutes at or above which a day counts as fully present (7 hours).
pub const DEFAULT_PRESENT_THRESHOLD_MINUTES: i64 = 420;

/// Named classification thresholds.
///
/// Deployments retune policy through configuration; the threshold is never
/// inlined at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Total minutes at or above which a day is `Present`.
    pub present_threshold_minutes: i64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            present_threshold_minutes: DEFAULT_PRESENT_THRESHOLD_MINUTES,
        }
    }
}

impl AttendancePolicy {
    /// Classifies a day's total worked minutes.
    #[must_use]
    pub const fn classify(&self, total_minutes: i64) -> AttendanceStatus {
        if total_minutes >= self.present_threshold_minutes {
            AttendanceStatus::Present
        } else if total_minutes > 0 {
            AttendanceStatus::Partial
        } else {
            AttendanceStatus::Absent
        }
    }
}

/// Attendance status of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Partial,
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Partial => "partial",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "partial" => Ok(Self::Partial),
            "absent" => Ok(Self::Absent),
            _ => Err(format!("invalid attendance status: {s}")),
        }
    }
}
