//! Completed-task model consumed by the scoring engine and stat aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSize {
    Small,
    Medium,
    Big,
}

impl TaskSize {
    /// Base points before the priority multiplier.
    pub fn base_points(&self) -> f64 {
        match self {
            TaskSize::Small => 10.0,
            TaskSize::Medium => 25.0,
            TaskSize::Big => 50.0,
        }
    }
}

impl FromStr for TaskSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(TaskSize::Small),
            "medium" | "m" => Ok(TaskSize::Medium),
            "big" | "large" | "l" => Ok(TaskSize::Big),
            other => Err(anyhow::anyhow!("unknown task size: {other}")),
        }
    }
}

impl fmt::Display for TaskSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskSize::Small => "small",
            TaskSize::Medium => "medium",
            TaskSize::Big => "big",
        };
        f.write_str(s)
    }
}

/// A task as seen by the scoring engine.
///
/// Every attribute except the id is optional; scoring substitutes neutral
/// defaults for anything missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: String,
    pub title: String,

    pub size: Option<TaskSize>,

    /// 1 (highest) through 5.
    pub priority: Option<u8>,

    pub created_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,

    /// `None` means the task is still open.
    pub completion_date: Option<DateTime<Utc>>,

    /// Whether the task was picked for the daily short list.
    #[serde(default)]
    pub on_short_list: bool,
}

impl CompletedTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            size: None,
            priority: None,
            created_at: None,
            due_date: None,
            completion_date: None,
            on_short_list: false,
        }
    }

    pub fn with_size(mut self, size: TaskSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn completed_at(mut self, completion_date: DateTime<Utc>) -> Self {
        self.completion_date = Some(completion_date);
        self
    }

    pub fn on_short_list(mut self) -> Self {
        self.on_short_list = true;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completion_date.is_some()
    }

    pub fn is_big(&self) -> bool {
        self.size == Some(TaskSize::Big)
    }
}
