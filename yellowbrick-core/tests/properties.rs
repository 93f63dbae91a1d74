use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use yellowbrick_core::{
    calculate_level, calculate_quest_gravity, calculate_task_points, check_achievements,
    level_progress, points_for_next_level, CompletedTask, EmotionalWeight, EnergyCost,
    MeaningLevel, Quest, RewardType, TaskSize, UserStats,
};

fn size() -> impl Strategy<Value = Option<TaskSize>> {
    prop_oneof![
        Just(None),
        Just(Some(TaskSize::Small)),
        Just(Some(TaskSize::Medium)),
        Just(Some(TaskSize::Big)),
    ]
}

fn opt<T: Clone + std::fmt::Debug + 'static>(values: Vec<T>) -> impl Strategy<Value = Option<T>> {
    prop_oneof![Just(None), proptest::sample::select(values).prop_map(Some)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn task_points_stay_within_bounds(
        size in size(),
        priority in proptest::option::of(0u8..10),
        created_offset in proptest::option::of(-72i64..72),
        due_offset in proptest::option::of(-72i64..72),
    ) {
        let done = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let mut t = CompletedTask::new("p", "prop").completed_at(done);
        t.size = size;
        t.priority = priority;
        t.created_at = created_offset.map(|h| done - Duration::hours(h));
        t.due_date = due_offset.map(|h| done + Duration::hours(h));

        let pts = calculate_task_points(&t);
        // 50 * 2.0 + 15 + 10
        prop_assert!(pts <= 125);
        prop_assert!(pts >= 8);
    }

    #[test]
    fn level_floor_never_exceeds_points(points in 0u64..50_000_000) {
        let level = calculate_level(points);
        prop_assert!(level >= 1);
        prop_assert!(points_for_next_level(level - 1) <= points);
        prop_assert!(points < points_for_next_level(level));
    }

    #[test]
    fn level_is_monotonic(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_level(lo) <= calculate_level(hi));
    }

    #[test]
    fn progress_percentage_in_range(points in any::<u64>()) {
        let p = level_progress(points);
        prop_assert!((0.0..=100.0).contains(&p.percentage));
    }

    #[test]
    fn achievements_never_repeat_unlocked(
        tasks in 0u32..200,
        big in 0u32..20,
        short in 0u32..20,
        streak in 0u32..40,
        points in 0u64..20_000,
        mask in any::<u8>(),
    ) {
        let stats = UserStats {
            total_points: points,
            tasks_completed: tasks,
            big_tasks_completed: big,
            short_list_tasks_completed: short,
            current_streak: streak,
            longest_streak: streak,
            last_activity: None,
        };
        let unlocked: Vec<&str> = yellowbrick_core::ACHIEVEMENTS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, a)| a.id)
            .collect();

        let newly = check_achievements(&stats, &unlocked);
        for id in &newly {
            prop_assert!(!unlocked.contains(id));
        }
    }

    #[test]
    fn visual_mass_always_clamped(
        minutes in proptest::option::of(0u32..1_000),
        energy in opt(vec![EnergyCost::Low, EnergyCost::Medium, EnergyCost::High, EnergyCost::Extreme]),
        emotion in opt(vec![EmotionalWeight::Light, EmotionalWeight::Moderate, EmotionalWeight::Heavy, EmotionalWeight::Overwhelming]),
        meaning in opt(vec![MeaningLevel::Routine, MeaningLevel::Important, MeaningLevel::Critical, MeaningLevel::LifeChanging]),
        reward in opt(vec![RewardType::Small, RewardType::Medium, RewardType::Large, RewardType::Epic]),
        is_overdue in any::<bool>(),
        is_planet_quest in any::<bool>(),
    ) {
        let q = Quest {
            title: None,
            estimated_minutes: minutes,
            energy_cost: energy,
            emotional_weight: emotion,
            meaning_level: meaning,
            reward_type: reward,
            is_overdue,
            is_planet_quest,
        };
        let g = calculate_quest_gravity(&q);
        prop_assert!((0.0..=100.0).contains(&g.visual_mass));
        prop_assert!(g.total_mass > 0.0);
    }
}
