//! Aggregate user statistics, recomputed from task history.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::leveling::{calculate_level, level_progress, LevelProgress};
use crate::scoring::calculate_task_points;
use crate::streak::{streak_lengths, StreakPolicy};
use crate::task::CompletedTask;
use crate::time::local_day;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u64,
    pub tasks_completed: u32,
    pub big_tasks_completed: u32,
    pub short_list_tasks_completed: u32,
    pub current_streak: u32,
    /// Always >= `current_streak`.
    pub longest_streak: u32,
    pub last_activity: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Rebuild stats from every completed task in `tasks`; open tasks are ignored.
    ///
    /// Streak days are calendar days in `tz`.
    pub fn from_history(
        tasks: &[CompletedTask],
        now: DateTime<Utc>,
        tz: Tz,
        policy: StreakPolicy,
    ) -> Self {
        let mut stats = UserStats::default();
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();

        for task in tasks {
            let Some(done) = task.completion_date else {
                continue;
            };

            stats.total_points += calculate_task_points(task) as u64;
            stats.tasks_completed += 1;
            if task.is_big() {
                stats.big_tasks_completed += 1;
            }
            if task.on_short_list {
                stats.short_list_tasks_completed += 1;
            }

            days.insert(local_day(done, tz));
            stats.last_activity = Some(stats.last_activity.map_or(done, |l| l.max(done)));
        }

        let maintained = stats
            .last_activity
            .is_some_and(|last| policy.maintains(last, now));
        let streak = streak_lengths(&days, maintained);
        stats.current_streak = streak.current;
        stats.longest_streak = streak.longest;

        tracing::debug!(
            points = stats.total_points,
            completed = stats.tasks_completed,
            streak = stats.current_streak,
            "recomputed user stats"
        );
        stats
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.total_points)
    }

    pub fn level_progress(&self) -> LevelProgress {
        level_progress(self.total_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskSize;
    use chrono::{Duration, TimeZone};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, d, h, 0, 0).unwrap()
    }

    #[test]
    fn aggregates_completed_tasks_only() {
        let tasks = vec![
            CompletedTask::new("1", "a").with_size(TaskSize::Big).completed_at(at(1, 15)),
            CompletedTask::new("2", "b")
                .with_size(TaskSize::Medium)
                .on_short_list()
                .completed_at(at(2, 15)),
            CompletedTask::new("3", "open").with_size(TaskSize::Big),
        ];

        let stats = UserStats::from_history(&tasks, at(2, 20), chrono_tz::UTC, StreakPolicy::default());
        assert_eq!(stats.tasks_completed, 2);
        assert_eq!(stats.big_tasks_completed, 1);
        assert_eq!(stats.short_list_tasks_completed, 1);
        assert_eq!(stats.total_points, 75);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.last_activity, Some(at(2, 15)));
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn stale_activity_breaks_current_streak() {
        let tasks = vec![
            CompletedTask::new("1", "a").completed_at(at(1, 15)),
            CompletedTask::new("2", "b").completed_at(at(2, 15)),
        ];
        let now = at(2, 15) + Duration::hours(40);
        let stats = UserStats::from_history(&tasks, now, chrono_tz::UTC, StreakPolicy::default());
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn days_follow_local_timezone() {
        // 03:00 UTC on the 2nd is still the 1st in Chicago.
        let tasks = vec![
            CompletedTask::new("1", "a").completed_at(at(1, 15)),
            CompletedTask::new("2", "b").completed_at(at(2, 3)),
        ];
        let now = at(2, 4);
        let utc = UserStats::from_history(&tasks, now, chrono_tz::UTC, StreakPolicy::default());
        let chicago =
            UserStats::from_history(&tasks, now, chrono_tz::America::Chicago, StreakPolicy::default());
        assert_eq!(utc.current_streak, 2);
        assert_eq!(chicago.current_streak, 1);
    }

    #[test]
    fn empty_history_is_default() {
        let stats = UserStats::from_history(&[], at(1, 0), chrono_tz::UTC, StreakPolicy::default());
        assert_eq!(stats, UserStats::default());
    }
}
