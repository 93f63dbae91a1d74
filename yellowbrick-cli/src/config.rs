use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use yellowbrick_core::onboarding::DEFAULT_JOURNEY_DAYS;
use yellowbrick_core::streak::DEFAULT_GRACE_HOURS;
use yellowbrick_core::time::parse_tz;
use yellowbrick_core::StreakPolicy;

use crate::logging::DEFAULT_FILTER;
use crate::state::ensure_home;

/// Longest grace window accepted from config: one year.
pub const MAX_GRACE_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileSection,
    pub streak: StreakSection,
    pub onboarding: OnboardingSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA name; decides where local days start and end.
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakSection {
    pub grace_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingSection {
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directives; RUST_LOG takes precedence.
    pub filter: String,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl Default for StreakSection {
    fn default() -> Self {
        Self {
            grace_hours: DEFAULT_GRACE_HOURS,
        }
    }
}

impl Default for OnboardingSection {
    fn default() -> Self {
        Self {
            days: DEFAULT_JOURNEY_DAYS,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn tz(&self) -> Result<Tz> {
        parse_tz(&self.profile.timezone).context("config [profile] timezone")
    }

    pub fn streak_policy(&self) -> Result<StreakPolicy> {
        let hours = self.streak.grace_hours;
        if !(0..=MAX_GRACE_HOURS).contains(&hours) {
            bail!("config [streak] grace_hours must be between 0 and {MAX_GRACE_HOURS}, got {hours}");
        }
        Ok(StreakPolicy::new(hours))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults; missing keys fall back per section.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
