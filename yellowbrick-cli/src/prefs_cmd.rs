use anyhow::Result;
use chrono::{DateTime, Utc};
use yellowbrick_core::{AccessibilitySettings, BrainDumpDraft};

use crate::state::open_store;

pub fn show_settings() -> Result<()> {
    let store = open_store()?;
    print_settings(&AccessibilitySettings::load(&store)?);
    Ok(())
}

pub fn set_settings(
    reduced_motion: Option<bool>,
    high_contrast: Option<bool>,
    font_scale: Option<f64>,
) -> Result<()> {
    let mut store = open_store()?;
    let mut settings = AccessibilitySettings::load(&store)?;

    if let Some(v) = reduced_motion {
        settings.reduced_motion = v;
    }
    if let Some(v) = high_contrast {
        settings.high_contrast = v;
    }
    if let Some(v) = font_scale {
        settings = settings.with_font_scale(v);
    }

    settings.save(&mut store)?;
    print_settings(&settings);
    Ok(())
}

fn print_settings(s: &AccessibilitySettings) {
    println!("reduced_motion = {}", s.reduced_motion);
    println!("high_contrast  = {}", s.high_contrast);
    println!("font_scale     = {:.2}", s.font_scale);
}

pub fn save_draft(text: &str, now: DateTime<Utc>) -> Result<()> {
    let mut store = open_store()?;
    let draft = BrainDumpDraft::new(text, now);
    draft.save(&mut store)?;

    let ideas = draft.ideas().count();
    if ideas == 0 {
        println!("Draft cleared.");
    } else {
        println!("Draft saved ({ideas} idea(s)).");
    }
    Ok(())
}

pub fn show_draft() -> Result<()> {
    let store = open_store()?;
    match BrainDumpDraft::load(&store)? {
        Some(d) => {
            println!("Saved {}\n", d.saved_at.format("%Y-%m-%d %H:%M UTC"));
            for idea in d.ideas() {
                println!("- {idea}");
            }
        }
        None => println!("No draft."),
    }
    Ok(())
}

pub fn clear_draft() -> Result<()> {
    let mut store = open_store()?;
    BrainDumpDraft::clear(&mut store)?;
    println!("Draft cleared.");
    Ok(())
}
