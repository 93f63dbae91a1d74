//! Leveling: cumulative points to level, with progress inside the level.
//!
//! Level `L` covers `[(L-1)^2 * 100, L^2 * 100)` points.

use serde::{Deserialize, Serialize};

/// `floor(sqrt(total_points / 100)) + 1`, computed in integers.
pub fn calculate_level(total_points: u64) -> u32 {
    (isqrt(total_points / 100) + 1).min(u32::MAX as u64) as u32
}

/// Points at which `level` ends and `level + 1` begins.
pub fn points_for_next_level(level: u32) -> u64 {
    let l = level as u64;
    l.saturating_mul(l).saturating_mul(100)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub total_points: u64,
    /// Points where the current level started.
    pub level_floor: u64,
    /// Points where the next level starts.
    pub next_level_at: u64,
    pub points_into_level: u64,
    pub points_needed: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

pub fn level_progress(total_points: u64) -> LevelProgress {
    let level = calculate_level(total_points);
    let level_floor = points_for_next_level(level - 1);
    let next_level_at = points_for_next_level(level);

    let span = next_level_at.saturating_sub(level_floor);
    let into = total_points.saturating_sub(level_floor);
    let percentage = if span == 0 {
        100.0
    } else {
        (into as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
    };

    LevelProgress {
        level,
        total_points,
        level_floor,
        next_level_at,
        points_into_level: into,
        points_needed: next_level_at.saturating_sub(total_points),
        percentage,
    }
}

/// Rank shown next to the level badge.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0 | 1 => "Munchkin",
        2 => "Scarecrow's Apprentice",
        3 => "Tin Woodman",
        4 => "Cowardly Lion",
        5 => "Emerald Guard",
        6 => "Winkie Captain",
        7 => "Quadling Scout",
        8 => "Good Witch of the North",
        9 => "Glinda's Confidant",
        _ => "Wizard of Oz",
    }
}

fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).is_none_or(|sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(399), 2);
        assert_eq!(calculate_level(400), 3);
        assert_eq!(calculate_level(8_100), 10);
    }

    #[test]
    fn next_level_points() {
        assert_eq!(points_for_next_level(0), 0);
        assert_eq!(points_for_next_level(1), 100);
        assert_eq!(points_for_next_level(3), 900);
    }

    #[test]
    fn progress_inside_level() {
        let p = level_progress(250);
        assert_eq!(p.level, 2);
        assert_eq!(p.level_floor, 100);
        assert_eq!(p.next_level_at, 400);
        assert_eq!(p.points_into_level, 150);
        assert_eq!(p.points_needed, 150);
        assert_eq!(p.percentage, 50.0);
    }

    #[test]
    fn progress_at_zero() {
        let p = level_progress(0);
        assert_eq!(p.level, 1);
        assert_eq!(p.percentage, 0.0);
        assert_eq!(p.points_needed, 100);
    }

    #[test]
    fn isqrt_handles_large_values() {
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
    }

    #[test]
    fn titles() {
        assert_eq!(level_title(1), "Munchkin");
        assert_eq!(level_title(5), "Emerald Guard");
        assert_eq!(level_title(42), "Wizard of Oz");
    }
}
