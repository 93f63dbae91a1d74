//! Quest gravity: how hard a quest pulls on attention, weighed against the
//! ambient pull of novelty (open tabs, unprocessed ideas, emotional load).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const TIME_WEIGHT: f64 = 1.0;
pub const ENERGY_WEIGHT: f64 = 1.5;
pub const EMOTION_WEIGHT: f64 = 1.2;
pub const MEANING_WEIGHT: f64 = 2.0;
pub const REWARD_WEIGHT: f64 = 1.3;

pub const OVERDUE_BOOST: f64 = 1.5;
pub const PLANET_QUEST_BOOST: f64 = 2.0;

/// 10 * sum(weights) * planet boost. Mass at or above this renders as 100.
pub const MAX_THEORETICAL_MASS: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyCost {
    Low,
    Medium,
    High,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmotionalWeight {
    Light,
    Moderate,
    Heavy,
    Overwhelming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeaningLevel {
    Routine,
    Important,
    Critical,
    LifeChanging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardType {
    Small,
    Medium,
    Large,
    Epic,
}

impl EnergyCost {
    pub fn score(&self) -> f64 {
        match self {
            EnergyCost::Low => 2.0,
            EnergyCost::Medium => 5.0,
            EnergyCost::High => 8.0,
            EnergyCost::Extreme => 10.0,
        }
    }
}

impl EmotionalWeight {
    pub fn score(&self) -> f64 {
        match self {
            EmotionalWeight::Light => 2.0,
            EmotionalWeight::Moderate => 4.0,
            EmotionalWeight::Heavy => 7.0,
            EmotionalWeight::Overwhelming => 10.0,
        }
    }
}

impl MeaningLevel {
    pub fn score(&self) -> f64 {
        match self {
            MeaningLevel::Routine => 2.0,
            MeaningLevel::Important => 5.0,
            MeaningLevel::Critical => 8.0,
            MeaningLevel::LifeChanging => 10.0,
        }
    }
}

impl RewardType {
    pub fn score(&self) -> f64 {
        match self {
            RewardType::Small => 2.0,
            RewardType::Medium => 5.0,
            RewardType::Large => 8.0,
            RewardType::Epic => 10.0,
        }
    }
}

/// Score for an estimated duration; longer quests weigh more.
pub fn time_score(estimated_minutes: Option<u32>) -> f64 {
    match estimated_minutes {
        None => 5.0,
        Some(m) if m <= 15 => 2.0,
        Some(m) if m <= 30 => 4.0,
        Some(m) if m <= 60 => 6.0,
        Some(m) if m <= 120 => 8.0,
        Some(_) => 10.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quest {
    pub title: Option<String>,
    pub estimated_minutes: Option<u32>,
    pub energy_cost: Option<EnergyCost>,
    pub emotional_weight: Option<EmotionalWeight>,
    pub meaning_level: Option<MeaningLevel>,
    pub reward_type: Option<RewardType>,
    pub is_overdue: bool,
    pub is_planet_quest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestGravity {
    pub time_score: f64,
    pub energy_score: f64,
    pub emotion_score: f64,
    pub meaning_score: f64,
    pub reward_score: f64,
    /// Weighted sum after boosts.
    pub total_mass: f64,
    /// `total_mass` normalized to 0-100.
    pub visual_mass: f64,
}

pub fn calculate_quest_gravity(quest: &Quest) -> QuestGravity {
    let time = time_score(quest.estimated_minutes);
    let energy = quest.energy_cost.map_or(5.0, |e| e.score());
    let emotion = quest.emotional_weight.map_or(4.0, |e| e.score());
    let meaning = quest.meaning_level.map_or(5.0, |m| m.score());
    let reward = quest.reward_type.map_or(5.0, |r| r.score());

    let mut total_mass = time * TIME_WEIGHT
        + energy * ENERGY_WEIGHT
        + emotion * EMOTION_WEIGHT
        + meaning * MEANING_WEIGHT
        + reward * REWARD_WEIGHT;

    if quest.is_overdue {
        total_mass *= OVERDUE_BOOST;
    }
    if quest.is_planet_quest {
        total_mass *= PLANET_QUEST_BOOST;
    }

    let visual_mass = (total_mass / MAX_THEORETICAL_MASS * 100.0).clamp(0.0, 100.0);

    QuestGravity {
        time_score: time,
        energy_score: energy,
        emotion_score: emotion,
        meaning_score: meaning,
        reward_score: reward,
        total_mass,
        visual_mass,
    }
}

/// Competing pull of distractions, 0-100. Negative or NaN emotional load counts as zero.
pub fn ambient_novelty_gravity(tab_count: u32, unprocessed_ideas: u32, emotional_load: f64) -> f64 {
    let load = if emotional_load.is_nan() {
        0.0
    } else {
        emotional_load.max(0.0)
    };
    let raw = tab_count as f64 * 3.0 + unprocessed_ideas as f64 * 5.0 + load * 0.3;
    raw.min(100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GravityBand {
    /// ratio < 0.5
    Overwhelmed,
    /// 0.5 <= ratio < 1
    Drifting,
    /// 1 <= ratio < 2
    Steady,
    /// ratio >= 2
    Locked,
}

impl GravityBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            GravityBand::Overwhelmed
        } else if ratio < 1.0 {
            GravityBand::Drifting
        } else if ratio < 2.0 {
            GravityBand::Steady
        } else {
            GravityBand::Locked
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            GravityBand::Overwhelmed => {
                "Novelty is winning. Close some tabs and park new ideas before starting."
            }
            GravityBand::Drifting => {
                "Your orbit is slipping. Capture stray ideas, then pick one small step."
            }
            GravityBand::Steady => "Stable orbit. Keep going and protect your focus.",
            GravityBand::Locked => "Strong pull. This quest has your full attention; ride it.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GravityCheck {
    pub is_stable: bool,
    pub gravity_ratio: f64,
    pub band: GravityBand,
    pub recommendation: &'static str,
}

/// Compare quest pull to novelty pull. The denominator never drops below 1.
pub fn gravity_check(quest_gravity: f64, novelty_gravity: f64) -> GravityCheck {
    let gravity_ratio = quest_gravity / novelty_gravity.max(1.0);
    let band = GravityBand::from_ratio(gravity_ratio);
    GravityCheck {
        is_stable: gravity_ratio >= 1.0,
        gravity_ratio,
        band,
        recommendation: band.recommendation(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedQuest {
    /// Position of the quest in the input slice.
    pub index: usize,
    pub title: Option<String>,
    pub gravity: QuestGravity,
}

/// Heaviest quests first; equal masses keep their input order.
pub fn rank_quests(quests: &[Quest]) -> Vec<RankedQuest> {
    let mut ranked: Vec<RankedQuest> = quests
        .iter()
        .enumerate()
        .map(|(index, q)| RankedQuest {
            index,
            title: q.title.clone(),
            gravity: calculate_quest_gravity(q),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.gravity
            .total_mass
            .partial_cmp(&a.gravity.total_mass)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
