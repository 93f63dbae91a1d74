//! Onboarding walks the user down the road one day at a time.
//!
//! Day `n` opens once `(n - 1) * 24h` have passed since the start and day
//! `n - 1` is done. Day 1 is open immediately.

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::store::{keys, KvStore, KvStoreExt};

pub const DEFAULT_JOURNEY_DAYS: u32 = 7;

/// Longest journey accepted; longer ones are clamped on start and rejected on load.
pub const MAX_JOURNEY_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    pub started_at: DateTime<Utc>,
    pub journey_days: u32,
    pub completed_days: BTreeSet<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardDecision {
    /// Day the user should work on now, if any is open.
    pub next_day: Option<u32>,
    /// Minutes until the next day opens, when everything open is done.
    pub unlocks_in_minutes: Option<i64>,
    pub finished: bool,
    pub message: String,
}

impl OnboardingProgress {
    pub fn start(now: DateTime<Utc>, journey_days: u32) -> Self {
        Self {
            started_at: now,
            journey_days: journey_days.clamp(1, MAX_JOURNEY_DAYS),
            completed_days: BTreeSet::new(),
        }
    }

    /// `None` when the date falls outside chrono's range: that day never opens.
    fn opens_at(&self, day: u32) -> Option<DateTime<Utc>> {
        let offset = Duration::try_days(day as i64 - 1)?;
        self.started_at.checked_add_signed(offset)
    }

    pub fn is_unlocked(&self, day: u32, now: DateTime<Utc>) -> bool {
        if day == 0 || day > self.journey_days {
            return false;
        }
        match self.opens_at(day) {
            Some(at) if now >= at => {}
            _ => return false,
        }
        day == 1 || self.completed_days.contains(&(day - 1))
    }

    pub fn unlocked_days(&self, now: DateTime<Utc>) -> Vec<u32> {
        (1..=self.journey_days)
            .filter(|d| self.is_unlocked(*d, now))
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        (1..=self.journey_days).all(|d| self.completed_days.contains(&d))
    }

    pub fn complete_day(&mut self, day: u32, now: DateTime<Utc>) -> Result<()> {
        if day == 0 || day > self.journey_days {
            bail!("day {day} is outside the {}-day journey", self.journey_days);
        }
        if !self.is_unlocked(day, now) {
            bail!("day {day} is still locked");
        }
        if self.completed_days.insert(day) {
            tracing::debug!(day, "onboarding day completed");
        }
        Ok(())
    }

    pub fn next_step(&self, now: DateTime<Utc>) -> OnboardDecision {
        if self.is_finished() {
            return OnboardDecision {
                next_day: None,
                unlocks_in_minutes: None,
                finished: true,
                message: "You made it to the Emerald City. Onboarding is complete.".to_string(),
            };
        }

        // First day not yet done; every earlier day is complete by construction.
        let pending = (1..=self.journey_days)
            .find(|d| !self.completed_days.contains(d))
            .unwrap_or(self.journey_days);

        if self.is_unlocked(pending, now) {
            return OnboardDecision {
                next_day: Some(pending),
                unlocks_in_minutes: None,
                finished: false,
                message: format!("Day {pending}: {}", day_title(pending)),
            };
        }

        let Some(opens) = self.opens_at(pending) else {
            return OnboardDecision {
                next_day: None,
                unlocks_in_minutes: None,
                finished: false,
                message: format!("Day {pending} is out of reach."),
            };
        };
        let wait = (opens - now).num_minutes().max(0);
        OnboardDecision {
            next_day: None,
            unlocks_in_minutes: Some(wait),
            finished: false,
            message: format!(
                "Rest up. Day {pending} opens in {}h {}m.",
                wait / 60,
                wait % 60
            ),
        }
    }

    pub fn load(store: &dyn KvStore) -> Result<Option<Self>> {
        let progress: Option<Self> = store.get_json(keys::ONBOARDING)?;
        if let Some(p) = &progress {
            if p.journey_days == 0 || p.journey_days > MAX_JOURNEY_DAYS {
                bail!(
                    "stored onboarding journey has {} days (expected 1-{MAX_JOURNEY_DAYS})",
                    p.journey_days
                );
            }
        }
        Ok(progress)
    }

    pub fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        store.set_json(keys::ONBOARDING, self)
    }
}

pub fn day_title(day: u32) -> &'static str {
    match day {
        1 => "Meet Dorothy and add your first three tasks",
        2 => "Follow the yellow brick road: build today's short list",
        3 => "Find your brain with the Scarecrow: empty a brain dump",
        4 => "Oil the Tin Woodman: finish one big task",
        5 => "Find courage with the Lion: tackle the overdue quest",
        6 => "Check the gravity of your quests",
        7 => "Arrive at the Emerald City: review your week",
        _ => "Keep walking the road",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn day_one_open_immediately() {
        let p = OnboardingProgress::start(t0(), 7);
        assert_eq!(p.unlocked_days(t0()), vec![1]);
        let d = p.next_step(t0());
        assert_eq!(d.next_day, Some(1));
        assert!(!d.finished);
    }

    #[test]
    fn day_two_needs_time_and_day_one() {
        let mut p = OnboardingProgress::start(t0(), 7);
        let later = t0() + Duration::hours(25);
        assert!(!p.is_unlocked(2, later));

        p.complete_day(1, t0()).unwrap();
        assert!(!p.is_unlocked(2, t0() + Duration::hours(23)));
        assert!(p.is_unlocked(2, t0() + Duration::hours(24)));
    }

    #[test]
    fn waiting_reports_minutes() {
        let mut p = OnboardingProgress::start(t0(), 7);
        p.complete_day(1, t0()).unwrap();
        let d = p.next_step(t0() + Duration::hours(20));
        assert_eq!(d.next_day, None);
        assert_eq!(d.unlocks_in_minutes, Some(240));
    }

    #[test]
    fn locked_or_out_of_range_days_rejected() {
        let mut p = OnboardingProgress::start(t0(), 3);
        assert!(p.complete_day(2, t0()).is_err());
        assert!(p.complete_day(0, t0()).is_err());
        assert!(p.complete_day(4, t0() + Duration::days(10)).is_err());
    }

    #[test]
    fn finishes_after_last_day() {
        let mut p = OnboardingProgress::start(t0(), 2);
        p.complete_day(1, t0()).unwrap();
        p.complete_day(2, t0() + Duration::days(1)).unwrap();
        assert!(p.is_finished());
        assert!(p.next_step(t0() + Duration::days(1)).finished);
    }

    #[test]
    fn journey_length_is_capped() {
        let p = OnboardingProgress::start(t0(), u32::MAX);
        assert_eq!(p.journey_days, MAX_JOURNEY_DAYS);
        assert!(!p.is_unlocked(200_000_000, t0()));
        assert_eq!(p.unlocked_days(t0()), vec![1]);
    }

    #[test]
    fn far_future_start_never_opens_and_never_panics() {
        let mut p = OnboardingProgress::start(DateTime::<Utc>::MAX_UTC, 3);
        p.completed_days.insert(1);
        assert!(!p.is_unlocked(2, DateTime::<Utc>::MAX_UTC));
        let d = p.next_step(t0());
        assert_eq!(d.next_day, None);
        assert_eq!(d.unlocks_in_minutes, None);
    }

    #[test]
    fn oversized_stored_journey_is_rejected() {
        let mut store = MemoryStore::new();
        let mut p = OnboardingProgress::start(t0(), 7);
        p.journey_days = u32::MAX;
        store.set_json(keys::ONBOARDING, &p).unwrap();
        assert!(OnboardingProgress::load(&store).is_err());
    }

    #[test]
    fn persists_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(OnboardingProgress::load(&store).unwrap(), None);

        let mut p = OnboardingProgress::start(t0(), 7);
        p.complete_day(1, t0()).unwrap();
        p.save(&mut store).unwrap();

        let loaded = OnboardingProgress::load(&store).unwrap().unwrap();
        assert_eq!(loaded, p);
    }
}
