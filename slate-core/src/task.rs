//! Canonical task model: one uniform record for every source domain.
//!
//! Normalizers in `slate-ingest` map raw LMS / registrar / manual records into
//! this shape; the planner consumes it as an immutable snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open bag of source-specific attributes (external URL, points possible,
/// section, instructor, ...). Known keys are documented per source domain in
/// `slate-ingest`.
pub type Metadata = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    /// Graded-coursework system (assignments, submissions, calendar events).
    Lms,
    /// Registrar class schedule (recurring weekly meetings).
    Registrar,
    /// Manually entered todo.
    Manual,
}

impl TaskSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::Lms => "lms",
            TaskSource::Registrar => "registrar",
            TaskSource::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Assignment,
    Exam,
    Lecture,
    Lab,
    Recitation,
    Event,
    Todo,
}

impl TaskType {
    /// Recurring class meetings are schedule fixtures, not actionable work.
    pub fn is_class_meeting(&self) -> bool {
        matches!(self, TaskType::Lecture | TaskType::Lab | TaskType::Recitation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    /// Only ever set when the source explicitly reported a submitted/graded
    /// state. Never inferred from dates.
    Completed,
    Overdue,
}

/// Workflow buckets for the downstream board. The normalizer assigns a
/// default; any later layer may move a task between columns per-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanStage {
    BrainDump,
    KindaUrgent,
    InProgress,
    Done,
}

pub const KANBAN_STAGES: [KanbanStage; 4] = [
    KanbanStage::BrainDump,
    KanbanStage::KindaUrgent,
    KanbanStage::InProgress,
    KanbanStage::Done,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Canonical task record.
///
/// Recreated fresh on every normalization pass; there is no long-lived
/// identity beyond the id string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within one merged collection, stable within a sync cycle.
    pub id: String,
    pub source: TaskSource,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Course code (e.g. "15-112").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    /// Actionable deadline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Span start for time-boxed events/meetings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Derived, not source-of-truth.
    pub status: TaskStatus,
    pub kanban_stage: KanbanStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Original identifier in the source system. Traceability only.
    pub raw_source_id: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Task {
    /// Deterministic task id: same source record, same id, every pass.
    pub fn make_id(source: TaskSource, raw_key: &str) -> String {
        format!("{}-{}", source.as_str(), raw_key)
    }

    pub fn new(source: TaskSource, raw_key: &str, title: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            id: Self::make_id(source, raw_key),
            source,
            title: title.into(),
            description: None,
            course_code: None,
            course_name: None,
            due_at: None,
            start_at: None,
            end_at: None,
            location: None,
            task_type,
            status: TaskStatus::Pending,
            kanban_stage: KanbanStage::BrainDump,
            priority: None,
            raw_source_id: raw_key.to_string(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_span(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self.end_at = Some(end_at);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stage(mut self, stage: KanbanStage) -> Self {
        self.kanban_stage = stage;
        self
    }
}
