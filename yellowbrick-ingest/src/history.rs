//! Parse task-history CSV exports into scoring-ready tasks.
//!
//! Expected header (column order is free, extra columns are ignored):
//! id,title,size,priority,created_at,due_date,completed_at,short_list

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use yellowbrick_core::time::parse_timestamp;
use yellowbrick_core::{CompletedTask, TaskSize};

struct Columns {
    id: usize,
    title: Option<usize>,
    size: Option<usize>,
    priority: Option<usize>,
    created_at: Option<usize>,
    due_date: Option<usize>,
    completed_at: Option<usize>,
    short_list: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            id: find("id").context("history CSV has no 'id' column")?,
            title: find("title"),
            size: find("size"),
            priority: find("priority"),
            created_at: find("created_at"),
            due_date: find("due_date"),
            completed_at: find("completed_at").or_else(|| find("completion_date")),
            short_list: find("short_list"),
        })
    }
}

/// Parse a history CSV file. Local timestamps are read in `tz`.
pub fn parse_history_csv(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<CompletedTask>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_history(file, tz).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_history<R: Read>(reader: R, tz: Tz) -> Result<Vec<CompletedTask>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let cols = Columns::from_headers(rdr.headers()?)?;
    let priorities = PriorityParser::new()?;
    let mut tasks = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let id = record.get(cols.id).unwrap_or("");
        if id.is_empty() {
            tracing::warn!(row = line + 2, "skipping history row without an id");
            continue;
        }

        let size_raw = field(cols.size);
        let size = if size_raw.is_empty() {
            None
        } else {
            match size_raw.parse::<TaskSize>() {
                Ok(s) => Some(s),
                Err(_) => {
                    tracing::warn!(row = line + 2, value = size_raw, "unknown size, scoring as default");
                    None
                }
            }
        };

        tasks.push(CompletedTask {
            id: id.to_string(),
            title: field(cols.title).to_string(),
            size,
            priority: priorities.parse(field(cols.priority)),
            created_at: timestamp(field(cols.created_at), tz, line + 2),
            due_date: timestamp(field(cols.due_date), tz, line + 2),
            completion_date: timestamp(field(cols.completed_at), tz, line + 2),
            on_short_list: parse_flag(field(cols.short_list)),
        });
    }

    tracing::debug!(count = tasks.len(), "parsed task history");
    Ok(tasks)
}

/// Reads `2`, `P2`, `priority 2`. Anything else, including 0 or 6+, is no priority.
pub struct PriorityParser {
    re: Regex,
}

impl PriorityParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: Regex::new(r"(?i)^(?:p|priority\s*)?([1-5])$")?,
        })
    }

    pub fn parse(&self, s: &str) -> Option<u8> {
        self.re
            .captures(s.trim())
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "yes" | "y" | "true" | "1" | "x")
}

fn timestamp(s: &str, tz: Tz, row: usize) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    match parse_timestamp(s, tz) {
        Ok(dt) => Some(dt),
        Err(e) => {
            tracing::warn!(row, value = s, error = %e, "ignoring unparseable timestamp");
            None
        }
    }
}
