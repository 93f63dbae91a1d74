//! Locally persisted user preferences and drafts.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{keys, KvStore, KvStoreExt};

pub const MIN_FONT_SCALE: f64 = 0.75;
pub const MAX_FONT_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilitySettings {
    pub reduced_motion: bool,
    pub high_contrast: bool,
    pub font_scale: f64,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            high_contrast: false,
            font_scale: 1.0,
        }
    }
}

impl AccessibilitySettings {
    pub fn with_font_scale(mut self, scale: f64) -> Self {
        self.font_scale = clamp_font_scale(scale);
        self
    }

    /// Stored settings, or defaults when nothing was saved.
    pub fn load(store: &dyn KvStore) -> Result<Self> {
        let mut s: Self = store.get_json(keys::ACCESSIBILITY)?.unwrap_or_default();
        s.font_scale = clamp_font_scale(s.font_scale);
        Ok(s)
    }

    pub fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        store.set_json(keys::ACCESSIBILITY, self)
    }
}

fn clamp_font_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        1.0
    } else {
        scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
    }
}

/// An unfinished brain dump, kept so nothing typed is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainDumpDraft {
    pub text: String,
    pub saved_at: DateTime<Utc>,
}

impl BrainDumpDraft {
    pub fn new(text: impl Into<String>, saved_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            saved_at,
        }
    }

    pub fn load(store: &dyn KvStore) -> Result<Option<Self>> {
        store.get_json(keys::BRAIN_DUMP_DRAFT)
    }

    /// Empty drafts clear the stored one instead of saving.
    pub fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        if self.text.trim().is_empty() {
            return Self::clear(store);
        }
        store.set_json(keys::BRAIN_DUMP_DRAFT, self)
    }

    pub fn clear(store: &mut dyn KvStore) -> Result<()> {
        store.remove(keys::BRAIN_DUMP_DRAFT)
    }

    /// Non-empty lines, each one an idea waiting to be processed.
    pub fn ideas(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}
