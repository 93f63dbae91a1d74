use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use yellowbrick_core::store::keys;
use yellowbrick_core::time::parse_timestamp;
use yellowbrick_core::{
    ambient_novelty_gravity, calculate_quest_gravity, calculate_task_points, check_achievements,
    get_achievement, gravity_check, level_progress, level_title, merge_unlocked,
    priority_multiplier, rank_quests, BrainDumpDraft, CompletedTask, KvStoreExt, Quest,
    TaskSize, UserStats,
};
use yellowbrick_finance::{parse_earnings_csv, BenefitsReport, EntityType, SgaStatus};
use yellowbrick_ingest::parse_history_csv;

mod config;
mod logging;
mod onboard_cmd;
mod prefs_cmd;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "yellowbrick",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("YELLOWBRICK_BUILD_SHA"), ")"),
    about = "Yellow Brick: gamified tasks, quest gravity and benefits tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single task
    Score {
        /// small | medium | big (default: small)
        #[arg(long)]
        size: Option<String>,

        /// 1 (highest) to 5
        #[arg(long)]
        priority: Option<u8>,

        /// Created at (RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" in your timezone)
        #[arg(long)]
        created: Option<String>,

        /// Due date, same formats as --created
        #[arg(long)]
        due: Option<String>,

        /// Completed at (default: now)
        #[arg(long)]
        completed: Option<String>,
    },

    /// Level, rank title and progress for a point total
    Level { points: u64 },

    /// Is the streak still alive?
    Streak {
        /// Last activity; defaults to the value saved by `yellowbrick stats`
        #[arg(long)]
        last: Option<String>,
    },

    /// Recompute stats from a task-history CSV and unlock achievements
    Stats {
        #[arg(long)]
        csv: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Quest gravity versus ambient novelty
    Gravity {
        #[arg(long)]
        minutes: Option<u32>,

        /// low | medium | high | extreme
        #[arg(long)]
        energy: Option<String>,

        /// light | moderate | heavy | overwhelming
        #[arg(long)]
        emotion: Option<String>,

        /// routine | important | critical | life-changing
        #[arg(long)]
        meaning: Option<String>,

        /// small | medium | large | epic
        #[arg(long)]
        reward: Option<String>,

        #[arg(long)]
        overdue: bool,

        #[arg(long)]
        planet: bool,

        /// Open browser tabs
        #[arg(long, default_value_t = 0)]
        tabs: u32,

        /// Unprocessed ideas (default: lines in the saved brain dump)
        #[arg(long)]
        ideas: Option<u32>,

        /// Emotional load, 0-100
        #[arg(long, default_value_t = 0.0)]
        load: f64,

        #[arg(long)]
        json: bool,
    },

    /// Rank quests from a JSON array file, heaviest first
    Rank { file: PathBuf },

    /// Seven-day onboarding journey
    Onboard {
        #[command(subcommand)]
        command: OnboardCommand,
    },

    /// Accessibility settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Brain dump draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// SGA and trial work period report from a monthly earnings CSV
    Benefits {
        /// CSV with header month,gross,irwe
        #[arg(long)]
        csv: PathBuf,

        /// Use the statutory blindness SGA limit
        #[arg(long)]
        blind: bool,

        #[arg(long)]
        json: bool,
    },

    /// Federal tax forms for a business entity type
    TaxForms {
        /// e.g. "sole proprietor", "single-member llc", "s-corp"
        entity: String,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OnboardCommand {
    /// Begin the journey (no-op if already started)
    Start {
        /// Journey length (default: config [onboarding] days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show what to do next
    Status,
    /// Mark a day done
    Complete { day: u32 },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        reduced_motion: Option<bool>,

        #[arg(long)]
        high_contrast: Option<bool>,

        /// Clamped to 0.75-2.0
        #[arg(long)]
        font_scale: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Save text as the draft; an empty draft clears it
    Save { text: Vec<String> },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.yellowbrick/config.toml with defaults
    Init,
    /// Print the config path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config();
    let filter = cfg
        .as_ref()
        .map(|c| c.logging.filter.clone())
        .unwrap_or_else(|_| logging::DEFAULT_FILTER.to_string());
    logging::init(&filter);
    let cfg = cfg?;

    let now = Utc::now();

    match cli.command {
        Command::Score {
            size,
            priority,
            created,
            due,
            completed,
        } => {
            let tz = cfg.tz()?;
            let mut task = CompletedTask::new("cli", "ad hoc")
                .completed_at(opt_timestamp(completed.as_deref(), tz)?.unwrap_or(now));
            task.size = size.as_deref().map(str::parse::<TaskSize>).transpose()?;
            task.priority = priority;
            task.created_at = opt_timestamp(created.as_deref(), tz)?;
            task.due_date = opt_timestamp(due.as_deref(), tz)?;

            let base = task.size.unwrap_or(TaskSize::Small);
            println!(
                "{} points ({} base {} x{:.1})",
                calculate_task_points(&task),
                base,
                base.base_points(),
                priority_multiplier(task.priority)
            );
        }

        Command::Level { points } => {
            let p = level_progress(points);
            println!("Level {} - {}", p.level, level_title(p.level));
            println!(
                "{} / {} points ({:.1}%), {} to go",
                p.total_points, p.next_level_at, p.percentage, p.points_needed
            );
        }

        Command::Streak { last } => {
            let tz = cfg.tz()?;
            let policy = cfg.streak_policy()?;
            let raw = match last {
                Some(s) => s,
                None => {
                    let store = state::open_store()?;
                    match store.get_json::<String>(keys::LAST_ACTIVITY)? {
                        Some(s) => s,
                        None => bail!("No saved activity. Pass --last or run: yellowbrick stats --csv <history.csv>"),
                    }
                }
            };

            if policy.maintains_timestamp(&raw, tz, now) {
                println!("Streak alive (grace {}h).", policy.grace_hours);
            } else {
                println!("Streak broken. Complete a task to start a new one.");
            }
        }

        Command::Stats { csv, json } => {
            let tz = cfg.tz()?;
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let tasks = parse_history_csv(&csv, tz)?;
            let stats = UserStats::from_history(&tasks, now, tz, cfg.streak_policy()?);

            let mut store = state::open_store()?;
            let unlocked: Vec<String> = store
                .get_json(keys::UNLOCKED_ACHIEVEMENTS)?
                .unwrap_or_default();
            let newly = check_achievements(&stats, &unlocked);
            if !newly.is_empty() {
                store.set_json(keys::UNLOCKED_ACHIEVEMENTS, &merge_unlocked(&unlocked, &newly))?;
            }
            if let Some(last) = stats.last_activity {
                store.set_json(keys::LAST_ACTIVITY, &last.to_rfc3339())?;
            }

            if json {
                let out = serde_json::json!({
                    "stats": stats,
                    "progress": stats.level_progress(),
                    "newAchievements": newly,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_stats(&stats, &newly, tasks.len());
            }
        }

        Command::Gravity {
            minutes,
            energy,
            emotion,
            meaning,
            reward,
            overdue,
            planet,
            tabs,
            ideas,
            load,
            json,
        } => {
            let quest = Quest {
                title: None,
                estimated_minutes: minutes,
                energy_cost: opt_kebab(energy.as_deref(), "--energy")?,
                emotional_weight: opt_kebab(emotion.as_deref(), "--emotion")?,
                meaning_level: opt_kebab(meaning.as_deref(), "--meaning")?,
                reward_type: opt_kebab(reward.as_deref(), "--reward")?,
                is_overdue: overdue,
                is_planet_quest: planet,
            };

            let ideas = match ideas {
                Some(n) => n,
                None => {
                    let store = state::open_store()?;
                    BrainDumpDraft::load(&store)?
                        .map(|d| d.ideas().count() as u32)
                        .unwrap_or(0)
                }
            };

            let g = calculate_quest_gravity(&quest);
            let novelty = ambient_novelty_gravity(tabs, ideas, load);
            let check = gravity_check(g.visual_mass, novelty);

            if json {
                let out = serde_json::json!({
                    "quest": g,
                    "noveltyGravity": novelty,
                    "check": check,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "Quest mass {:.1} (visual {:.0}/100) vs novelty {:.0}/100",
                    g.total_mass, g.visual_mass, novelty
                );
                println!(
                    "Ratio {:.2} [{:?}] {}",
                    check.gravity_ratio,
                    check.band,
                    if check.is_stable { "stable" } else { "unstable" }
                );
                println!("{}", check.recommendation);
            }
        }

        Command::Rank { file } => {
            let s = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let quests: Vec<Quest> = serde_json::from_str(&s)
                .with_context(|| format!("parse quests in {}", file.display()))?;

            for (pos, r) in rank_quests(&quests).iter().enumerate() {
                println!(
                    "{:>2}. {:<40} mass={:>6.1} visual={:>3.0}",
                    pos + 1,
                    r.title.as_deref().unwrap_or("(untitled)"),
                    r.gravity.total_mass,
                    r.gravity.visual_mass
                );
            }
        }

        Command::Onboard { command } => match command {
            OnboardCommand::Start { days } => {
                onboard_cmd::start(days.unwrap_or(cfg.onboarding.days), now)?
            }
            OnboardCommand::Status => onboard_cmd::status(now)?,
            OnboardCommand::Complete { day } => onboard_cmd::complete(day, now)?,
        },

        Command::Settings { command } => match command {
            SettingsCommand::Show => prefs_cmd::show_settings()?,
            SettingsCommand::Set {
                reduced_motion,
                high_contrast,
                font_scale,
            } => prefs_cmd::set_settings(reduced_motion, high_contrast, font_scale)?,
        },

        Command::Draft { command } => match command {
            DraftCommand::Save { text } => prefs_cmd::save_draft(&text.join(" "), now)?,
            DraftCommand::Show => prefs_cmd::show_draft()?,
            DraftCommand::Clear => prefs_cmd::clear_draft()?,
        },

        Command::Benefits { csv, blind, json } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let records = parse_earnings_csv(&csv)?;
            let report = BenefitsReport::assess(&records, blind);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_benefits(&report);
            }
        }

        Command::TaxForms { entity } => {
            let entity: EntityType = entity.parse()?;
            println!("{entity}:");
            for form in entity.tax_forms() {
                println!("- {form}");
            }
            println!("Estimated payments: {}", entity.estimated_tax_form());
            if entity.owes_self_employment_tax() {
                println!("Owners pay self-employment tax on their share.");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn opt_timestamp(s: Option<&str>, tz: Tz) -> Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_timestamp(s, tz)).transpose()
}

/// Parse a kebab-case enum value the same way the JSON quest files spell it.
fn opt_kebab<T: DeserializeOwned>(s: Option<&str>, flag: &str) -> Result<Option<T>> {
    s.map(|s| {
        serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
            .with_context(|| format!("invalid value for {flag}: {s}"))
    })
    .transpose()
}

fn print_stats(stats: &UserStats, newly: &[&str], rows: usize) {
    let p = stats.level_progress();
    println!("Read {rows} tasks\n");
    println!("Level {} - {}", p.level, level_title(p.level));
    println!(
        "Points: {} ({:.1}% to level {})",
        stats.total_points,
        p.percentage,
        p.level + 1
    );
    println!(
        "Completed: {} (big {}, short list {})",
        stats.tasks_completed, stats.big_tasks_completed, stats.short_list_tasks_completed
    );
    println!(
        "Streak: {} day(s), longest {}",
        stats.current_streak, stats.longest_streak
    );

    if !newly.is_empty() {
        println!("\nNew achievements:");
        for a in newly.iter().filter_map(|id| get_achievement(id)) {
            println!("- [{}] {}: {}", a.tier.display_name(), a.name, a.description);
        }
    }
}

fn print_benefits(report: &BenefitsReport) {
    println!(
        "{:<8} {:>10} {:>10}  {:<9} {}",
        "month", "gross", "countable", "sga", "twp"
    );
    for m in &report.months {
        println!(
            "{:<8} {:>10.2} {:>10.2}  {:<9} {}",
            m.month.format("%Y-%m"),
            m.gross,
            m.countable,
            match m.sga {
                SgaStatus::AboveSga => "above",
                SgaStatus::BelowSga => "below",
            },
            if m.service_month { "service" } else { "" }
        );
    }

    let twp = &report.trial_work;
    println!(
        "\nMonths above SGA: {} ({} limit)",
        report.months_above_sga(),
        if report.blind { "blind" } else { "non-blind" }
    );
    println!(
        "Trial work months used: {}/{} ({} left)",
        twp.used(),
        yellowbrick_finance::TWP_MONTHS,
        twp.remaining()
    );
    if let Some(done) = twp.completed_in() {
        println!("Trial work period completed in {}", done.format("%Y-%m"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yellowbrick_core::EnergyCost;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn kebab_flags() {
        let e: Option<EnergyCost> = opt_kebab(Some("High"), "--energy").unwrap();
        assert_eq!(e, Some(EnergyCost::High));
        assert!(opt_kebab::<EnergyCost>(Some("huge"), "--energy").is_err());
        assert_eq!(opt_kebab::<EnergyCost>(None, "--energy").unwrap(), None);
    }
}
