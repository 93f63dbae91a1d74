use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use yellowbrick_core::onboarding::{day_title, MAX_JOURNEY_DAYS};
use yellowbrick_core::{KvStore, OnboardingProgress};

use crate::state::open_store;

fn check_journey_days(days: u32) -> Result<u32> {
    if days == 0 || days > MAX_JOURNEY_DAYS {
        bail!("journey length must be 1-{MAX_JOURNEY_DAYS} days, got {days}");
    }
    Ok(days)
}

pub fn start(days: u32, now: DateTime<Utc>) -> Result<()> {
    let days = check_journey_days(days)?;
    let mut store = open_store()?;
    if let Some(existing) = OnboardingProgress::load(&store)? {
        println!(
            "Journey already started {} ({} of {} days done).",
            existing.started_at.format("%Y-%m-%d"),
            existing.completed_days.len(),
            existing.journey_days
        );
        return Ok(());
    }

    let progress = OnboardingProgress::start(now, days);
    progress.save(&mut store)?;
    println!("Welcome to the yellow brick road: a {}-day journey.", progress.journey_days);
    println!("{}", progress.next_step(now).message);
    Ok(())
}

pub fn status(now: DateTime<Utc>) -> Result<()> {
    let store = open_store()?;
    let progress = require_progress(&store)?;

    for day in 1..=progress.journey_days {
        let mark = if progress.completed_days.contains(&day) {
            "x"
        } else if progress.is_unlocked(day, now) {
            ">"
        } else {
            " "
        };
        println!("[{mark}] Day {day}: {}", day_title(day));
    }
    println!("\n{}", progress.next_step(now).message);
    Ok(())
}

pub fn complete(day: u32, now: DateTime<Utc>) -> Result<()> {
    let mut store = open_store()?;
    let mut progress = require_progress(&store)?;
    progress.complete_day(day, now)?;
    progress.save(&mut store)?;

    println!("Day {day} done.");
    println!("{}", progress.next_step(now).message);
    Ok(())
}

fn require_progress(store: &dyn KvStore) -> Result<OnboardingProgress> {
    match OnboardingProgress::load(store)? {
        Some(p) => Ok(p),
        None => bail!("Onboarding not started. Run: yellowbrick onboard start"),
    }
}
