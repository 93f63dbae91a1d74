use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use yellowbrick_core::{check_achievements, StreakPolicy, TaskSize, UserStats};
use yellowbrick_ingest::parse_history_csv;

fn history_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("history.csv")
}

#[test]
fn parses_fixture_rows() {
    let tasks = parse_history_csv(history_path(), chrono_tz::America::Chicago).unwrap();

    // The row without an id is dropped.
    assert_eq!(tasks.len(), 6);
    assert!(tasks.iter().all(|t| !t.id.is_empty()));

    let landlord = &tasks[0];
    assert_eq!(landlord.priority, Some(2));
    assert!(landlord.on_short_list);
    assert_eq!(
        landlord.completion_date,
        Some(Utc.with_ymd_and_hms(2026, 5, 1, 14, 30, 0).unwrap())
    );

    let receipts = tasks.iter().find(|t| t.id == "t-004").unwrap();
    assert_eq!(receipts.size, Some(TaskSize::Big));
    assert_eq!(receipts.priority, None);
    assert!(!receipts.on_short_list);

    let poppies = tasks.iter().find(|t| t.id == "t-006").unwrap();
    assert!(!poppies.is_completed());
}

/// Full pipeline: fixture history into stats, level and achievements.
#[test]
fn recomputes_stats_from_fixture() {
    let tz = chrono_tz::America::Chicago;
    let tasks = parse_history_csv(history_path(), tz).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 20, 0, 0).unwrap();

    let stats = UserStats::from_history(&tasks, now, tz, StreakPolicy::default());
    assert_eq!(stats.tasks_completed, 4);
    assert_eq!(stats.big_tasks_completed, 2);
    assert_eq!(stats.short_list_tasks_completed, 2);
    // 40 + 115 + 30 + 60
    assert_eq!(stats.total_points, 245);
    assert_eq!(stats.current_streak, 4);
    assert_eq!(stats.longest_streak, 4);
    assert_eq!(stats.level(), 2);

    let none: [&str; 0] = [];
    assert_eq!(check_achievements(&stats, &none), vec!["first-step"]);
}
