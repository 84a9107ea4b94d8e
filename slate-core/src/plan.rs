//! Output types of the planning engine, plus the caller-supplied preferences.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Four-level estimate of how demanding the day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLoad {
    Chill,
    Normal,
    Busy,
    Cooked,
}

impl DayLoad {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayLoad::Chill => "chill",
            DayLoad::Normal => "normal",
            DayLoad::Busy => "busy",
            DayLoad::Cooked => "cooked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Medium,
    High,
}

/// Suggested contiguous work window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusBlock {
    pub id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakIdea {
    pub id: String,
    pub label: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskyTask {
    pub task_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    pub risk_level: RiskLevel,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub day_load: DayLoad,
    pub total_tasks_today: usize,
    pub total_due_today: usize,
    pub total_overdue: usize,
    pub free_block_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_due_at: Option<DateTime<Utc>>,
}

/// Structured daily context: everything a downstream presenter needs, nothing
/// voiced. The notes are neutral facts; tone is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningContext {
    pub summary: DaySummary,
    pub focus_blocks: Vec<FocusBlock>,
    pub break_ideas: Vec<BreakIdea>,
    pub risky_tasks: Vec<RiskyTask>,
    /// Task ids in recommended working order.
    pub suggested_order: Vec<String>,
    pub notes_for_coach: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialEnergy {
    Low,
    Medium,
    High,
}

/// Planner preferences. All fields have working defaults so an absent config
/// is a valid one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Start of the plannable day, "HH:MM".
    pub wake_time: String,
    /// End of the plannable day, "HH:MM".
    pub sleep_time: String,
    pub social_energy: SocialEnergy,
    pub preferred_locations: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            wake_time: "08:00".to_string(),
            sleep_time: "23:00".to_string(),
            social_energy: SocialEnergy::Medium,
            preferred_locations: Vec::new(),
        }
    }
}
