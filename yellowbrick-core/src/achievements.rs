//! Achievement catalog and unlock matching.
//!
//! The catalog is fixed and ordered. Unlock state lives with the caller as a
//! list of ids; matching only reports the delta.

use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl AchievementTier {
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

/// A catalog entry. Never mutated; `unlocked_by` is evaluated fresh each time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tier: AchievementTier,
    #[serde(skip)]
    pub unlocked_by: fn(&UserStats) -> bool,
}

impl Achievement {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        tier: AchievementTier,
        unlocked_by: fn(&UserStats) -> bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            tier,
            unlocked_by,
        }
    }

    pub fn is_earned(&self, stats: &UserStats) -> bool {
        (self.unlocked_by)(stats)
    }
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement::new(
        "first-step",
        "First Step on the Road",
        "Complete your first task",
        AchievementTier::Bronze,
        first_task,
    ),
    Achievement::new(
        "short-list-sweeper",
        "Short List Sweeper",
        "Complete 10 tasks from your daily short list",
        AchievementTier::Bronze,
        ten_short_list,
    ),
    Achievement::new(
        "lion-heart",
        "Heart of a Lion",
        "Complete 5 big tasks",
        AchievementTier::Silver,
        five_big,
    ),
    Achievement::new(
        "week-on-the-road",
        "A Week on the Road",
        "Keep a 7-day streak",
        AchievementTier::Silver,
        week_streak,
    ),
    Achievement::new(
        "emerald-city",
        "Gates of the Emerald City",
        "Reach level 5",
        AchievementTier::Silver,
        level_five,
    ),
    Achievement::new(
        "wizard",
        "Behind the Curtain",
        "Reach level 10",
        AchievementTier::Gold,
        level_ten,
    ),
    Achievement::new(
        "century",
        "Hundred Bricks",
        "Complete 100 tasks",
        AchievementTier::Gold,
        hundred_tasks,
    ),
    Achievement::new(
        "ruby-slippers",
        "Ruby Slippers",
        "Keep a 30-day streak",
        AchievementTier::Platinum,
        month_streak,
    ),
];

fn first_task(s: &UserStats) -> bool {
    s.tasks_completed >= 1
}

fn ten_short_list(s: &UserStats) -> bool {
    s.short_list_tasks_completed >= 10
}

fn five_big(s: &UserStats) -> bool {
    s.big_tasks_completed >= 5
}

fn week_streak(s: &UserStats) -> bool {
    s.current_streak >= 7
}

fn level_five(s: &UserStats) -> bool {
    s.level() >= 5
}

fn level_ten(s: &UserStats) -> bool {
    s.level() >= 10
}

fn hundred_tasks(s: &UserStats) -> bool {
    s.tasks_completed >= 100
}

fn month_streak(s: &UserStats) -> bool {
    s.current_streak >= 30
}

pub fn get_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Ids earned by `stats` that are not in `unlocked`, in catalog order.
pub fn check_achievements<S: AsRef<str>>(stats: &UserStats, unlocked: &[S]) -> Vec<&'static str> {
    let newly: Vec<&'static str> = ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.iter().any(|u| u.as_ref() == a.id))
        .filter(|a| a.is_earned(stats))
        .map(|a| a.id)
        .collect();

    if !newly.is_empty() {
        tracing::debug!(ids = ?newly, "achievements unlocked");
    }
    newly
}

/// Existing ids followed by new ones, without duplicates. This is what callers persist.
pub fn merge_unlocked<S: AsRef<str>>(unlocked: &[S], newly: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(unlocked.len() + newly.len());
    for id in unlocked.iter().map(|s| s.as_ref()).chain(newly.iter().copied()) {
        if !out.iter().any(|o| o == id) {
            out.push(id.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> UserStats {
        UserStats {
            total_points: 1_700,
            tasks_completed: 12,
            big_tasks_completed: 5,
            short_list_tasks_completed: 3,
            current_streak: 7,
            longest_streak: 9,
            last_activity: None,
        }
    }

    #[test]
    fn catalog_has_eight_unique_ids() {
        assert_eq!(ACHIEVEMENTS.len(), 8);
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            assert!(ACHIEVEMENTS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn new_unlocks_in_catalog_order() {
        let none: [&str; 0] = [];
        let newly = check_achievements(&stats(), &none);
        assert_eq!(newly, vec!["first-step", "lion-heart", "week-on-the-road", "emerald-city"]);
    }

    #[test]
    fn already_unlocked_ids_are_not_repeated() {
        let unlocked = vec!["lion-heart".to_string(), "first-step".to_string()];
        let newly = check_achievements(&stats(), &unlocked);
        assert_eq!(newly, vec!["week-on-the-road", "emerald-city"]);
        assert!(newly.iter().all(|id| !unlocked.iter().any(|u| u == id)));
    }

    #[test]
    fn fresh_user_unlocks_nothing() {
        let none: [&str; 0] = [];
        assert!(check_achievements(&UserStats::default(), &none).is_empty());
    }

    #[test]
    fn merge_keeps_order_and_dedupes() {
        let merged = merge_unlocked(&["wizard", "first-step"], &["first-step", "century"]);
        assert_eq!(merged, vec!["wizard", "first-step", "century"]);
    }

    #[test]
    fn lookup_by_id() {
        let a = get_achievement("ruby-slippers").unwrap();
        assert_eq!(a.tier, AchievementTier::Platinum);
        assert!(get_achievement("nope").is_none());
    }
}
