//! Daily streak policy.
//!
//! A streak survives as long as the last activity is within the grace window.
//! Evaluated on demand against an injected `now`; nothing runs in the background.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::time::parse_timestamp;

pub const DEFAULT_GRACE_HOURS: i64 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPolicy {
    pub grace_hours: i64,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            grace_hours: DEFAULT_GRACE_HOURS,
        }
    }
}

impl StreakPolicy {
    pub fn new(grace_hours: i64) -> Self {
        Self { grace_hours }
    }

    /// True iff no more than `grace_hours` have passed since `last_activity`.
    /// The boundary itself is inclusive. A window too large for chrono never expires.
    pub fn maintains(&self, last_activity: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match Duration::try_hours(self.grace_hours) {
            Some(grace) => now - last_activity <= grace,
            None => self.grace_hours > 0,
        }
    }

    /// Same rule for a stored or user-entered timestamp (RFC 3339, or local
    /// `YYYY-MM-DD[ HH:MM]` in `tz`). Anything unparseable breaks the streak.
    pub fn maintains_timestamp(&self, last_activity: &str, tz: Tz, now: DateTime<Utc>) -> bool {
        match parse_timestamp(last_activity, tz) {
            Ok(ts) => self.maintains(ts, now),
            Err(e) => {
                tracing::warn!(value = last_activity, error = %e, "unparseable last activity date");
                false
            }
        }
    }
}

/// Default 36-hour grace rule.
pub fn should_maintain_streak(last_activity: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    StreakPolicy::default().maintains(last_activity, now)
}

/// Default rule for an ISO timestamp; local forms are read as UTC.
pub fn should_maintain_streak_iso(last_activity: &str, now: DateTime<Utc>) -> bool {
    StreakPolicy::default().maintains_timestamp(last_activity, chrono_tz::UTC, now)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakLengths {
    pub current: u32,
    pub longest: u32,
}

/// Count consecutive-day runs over distinct activity days.
///
/// `current` is the run ending on the latest day, or 0 when `maintained` is false.
/// `longest` is never less than `current`.
pub fn streak_lengths(days: &BTreeSet<NaiveDate>, maintained: bool) -> StreakLengths {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    let current = if maintained { run } else { 0 };
    StreakLengths {
        current,
        longest: longest.max(current),
    }
}
