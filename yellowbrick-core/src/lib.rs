//! yellowbrick-core: scoring, leveling, streaks, achievements and quest gravity
//! for the Yellow Brick task tracker, plus the small local state it keeps.

pub mod achievements;
pub mod gravity;
pub mod leveling;
pub mod onboarding;
pub mod preferences;
pub mod scoring;
pub mod stats;
pub mod store;
pub mod streak;
pub mod task;
pub mod time;

pub use achievements::{
    check_achievements, get_achievement, merge_unlocked, Achievement, AchievementTier, ACHIEVEMENTS,
};
pub use gravity::{
    ambient_novelty_gravity, calculate_quest_gravity, gravity_check, rank_quests, EmotionalWeight,
    EnergyCost, GravityBand, GravityCheck, MeaningLevel, Quest, QuestGravity, RankedQuest,
    RewardType,
};
pub use leveling::{calculate_level, level_progress, level_title, points_for_next_level, LevelProgress};
pub use onboarding::{OnboardDecision, OnboardingProgress};
pub use preferences::{AccessibilitySettings, BrainDumpDraft};
pub use scoring::{calculate_task_points, priority_multiplier};
pub use stats::UserStats;
pub use store::{JsonFileStore, KvStore, KvStoreExt, MemoryStore};
pub use streak::{should_maintain_streak, should_maintain_streak_iso, StreakLengths, StreakPolicy};
pub use task::{CompletedTask, TaskSize};
