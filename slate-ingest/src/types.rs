//! Raw record shapes handed over by the source-system fetchers.
//!
//! Field names follow each source's own API (snake_case LMS, camelCase
//! registrar). Timestamp-ish fields stay strings here; the normalizers parse
//! them leniently so a malformed optional value degrades to "absent" instead
//! of failing the batch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsCourse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub workflow_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsSubmission {
    pub workflow_state: String,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub late: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsAssignment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub submission_types: Vec<String>,
    pub course_id: i64,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub is_quiz_assignment: Option<bool>,
    #[serde(default)]
    pub submission: Option<LmsSubmission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsCalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_at: String,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_address: Option<String>,
    #[serde(default)]
    pub context_code: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
}

/// One recurring class meeting from the registrar schedule.
///
/// `days` is the compact weekday-letter code ("MWF", "TR"); `R` is Thursday,
/// `U` is Sunday. Times are campus-local "HH:MM"; `timezone` is an optional
/// IANA name, UTC when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarEntry {
    pub id: String,
    pub course_code: String,
    pub course_title: String,
    #[serde(default)]
    pub section: Option<String>,
    /// Lecture, Lab, Recitation; anything else maps to Lecture.
    pub meeting_type: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub units: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// User-entered todo. `due_at` is RFC 3339; `due_local` + `timezone` is the
/// wall-clock alternative ("2025-04-28 23:59" + "America/New_York").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub due_local: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: bool,
}
