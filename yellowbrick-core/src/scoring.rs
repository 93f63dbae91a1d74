//! Task scoring: size, priority and timing turned into points.

use chrono::Duration;

use crate::task::{CompletedTask, TaskSize};

/// Flat bonus for finishing on or before the due date.
pub const ON_TIME_BONUS: f64 = 15.0;

/// Flat bonus for finishing within a day of creation.
pub const QUICK_FINISH_BONUS: f64 = 10.0;

/// Multiplier for a 1-5 priority. Missing or out-of-range priorities are neutral.
pub fn priority_multiplier(priority: Option<u8>) -> f64 {
    match priority {
        Some(1) => 2.0,
        Some(2) => 1.5,
        Some(3) => 1.2,
        Some(4) => 1.0,
        Some(5) => 0.8,
        _ => 1.0,
    }
}

/// Points for a task. Never negative; open tasks still score their base and
/// priority but cannot earn timing bonuses.
pub fn calculate_task_points(task: &CompletedTask) -> u32 {
    let base = task.size.unwrap_or(TaskSize::Small).base_points();
    let mut points = base * priority_multiplier(task.priority);

    if let (Some(done), Some(due)) = (task.completion_date, task.due_date) {
        if done <= due {
            points += ON_TIME_BONUS;
        }
    }

    if let (Some(done), Some(created)) = (task.completion_date, task.created_at) {
        let elapsed = done - created;
        // A completion stamped before creation is clock skew, not speed.
        if elapsed >= Duration::zero() && elapsed <= Duration::hours(24) {
            points += QUICK_FINISH_BONUS;
        }
    }

    points.round().max(0.0) as u32
}
