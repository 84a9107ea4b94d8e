//! Normalization: source-specific records in, canonical tasks out.
//!
//! Every mapping is total and side-effect-free. Malformed optional fields
//! degrade to `None`; derived fields (status, kanban stage, type) come from
//! the shared rules here so all three sources classify identically.

pub mod lms;
pub mod manual;
pub mod registrar;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use slate_core::task::{KanbanStage, Task, TaskStatus};
use slate_core::time::{hours_until, is_past, utc_date};
use slate_core::merge_task_lists;

use crate::types::{LmsAssignment, LmsCalendarEvent, LmsCourse, ManualEntry, RegistrarEntry};

/// Lenient RFC 3339 parse. Anything unparseable is treated as absent.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Default board column from due-date proximity: due within 48 hours, or
/// already overdue, is urgent; everything else parks in the dump.
pub fn stage_for_due(due_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> KanbanStage {
    let Some(due) = due_at else {
        return KanbanStage::BrainDump;
    };
    if hours_until(due, now) <= 48.0 {
        KanbanStage::KindaUrgent
    } else {
        KanbanStage::BrainDump
    }
}

/// Status from an explicit submitted flag and the due date. Completion is
/// never inferred from dates alone.
pub fn status_for(due_at: Option<DateTime<Utc>>, submitted: bool, now: DateTime<Utc>) -> TaskStatus {
    if submitted {
        return TaskStatus::Completed;
    }
    match due_at {
        Some(due) if is_past(due, now) => TaskStatus::Overdue,
        _ => TaskStatus::Pending,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// How many weeks of recurring class meetings to expand, starting today.
    pub weeks_of_schedule: i64,
    /// Keep submitted/graded assignments in the output.
    pub include_completed: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            weeks_of_schedule: 4,
            include_completed: false,
        }
    }
}

/// Already-fetched record batches for every source domain. Fetching (and its
/// auth/retry policy) belongs to the collaborators that fill this in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRecords {
    pub courses: Vec<LmsCourse>,
    pub assignments: Vec<LmsAssignment>,
    pub events: Vec<LmsCalendarEvent>,
    pub schedule: Vec<RegistrarEntry>,
    pub manual: Vec<ManualEntry>,
}

/// Normalize every source and concatenate: assignments, events, schedule
/// occurrences, manual todos, each in source order.
pub fn normalize_all(records: &SourceRecords, now: DateTime<Utc>, options: &NormalizeOptions) -> Vec<Task> {
    let course_by_id: HashMap<i64, &LmsCourse> =
        records.courses.iter().map(|c| (c.id, c)).collect();

    let mut assignments: Vec<Task> = records
        .assignments
        .iter()
        .map(|a| lms::assignment_to_task(a, course_by_id.get(&a.course_id).copied(), now))
        .collect();
    if !options.include_completed {
        assignments.retain(|t| t.status != TaskStatus::Completed);
    }

    let events: Vec<Task> = records
        .events
        .iter()
        .map(|e| lms::calendar_event_to_task(e, now))
        .collect();

    let window_start = utc_date(now);
    let window_end = window_start + Duration::weeks(options.weeks_of_schedule);
    let schedule: Vec<Task> = records
        .schedule
        .iter()
        .flat_map(|entry| registrar::entry_to_tasks(entry, window_start, window_end))
        .collect();

    let manual: Vec<Task> = records
        .manual
        .iter()
        .map(|m| manual::entry_to_task(m, now))
        .collect();

    merge_task_lists(vec![assignments, events, schedule, manual])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_stage_no_due_is_brain_dump() {
        assert_eq!(stage_for_due(None, at(2025, 1, 15, 12)), KanbanStage::BrainDump);
    }

    #[test]
    fn test_stage_within_48h_is_urgent() {
        let now = at(2025, 1, 15, 12);
        assert_eq!(stage_for_due(Some(at(2025, 1, 16, 12)), now), KanbanStage::KindaUrgent);
    }

    #[test]
    fn test_stage_overdue_is_urgent() {
        let now = at(2025, 1, 15, 12);
        assert_eq!(stage_for_due(Some(at(2025, 1, 14, 12)), now), KanbanStage::KindaUrgent);
    }

    #[test]
    fn test_stage_far_future_is_brain_dump() {
        let now = at(2025, 1, 15, 12);
        assert_eq!(stage_for_due(Some(at(2025, 1, 20, 12)), now), KanbanStage::BrainDump);
    }

    #[test]
    fn test_status_rules() {
        let now = at(2025, 1, 15, 12);
        assert_eq!(status_for(None, true, now), TaskStatus::Completed);
        assert_eq!(status_for(Some(at(2025, 1, 20, 12)), false, now), TaskStatus::Pending);
        assert_eq!(status_for(Some(at(2025, 1, 14, 12)), false, now), TaskStatus::Overdue);
        // A submitted state wins even when the due date is long past.
        assert_eq!(status_for(Some(at(2025, 1, 1, 12)), true, now), TaskStatus::Completed);
        assert_eq!(status_for(None, false, now), TaskStatus::Pending);
    }

    #[test]
    fn test_parse_instant_lenient() {
        assert!(parse_instant("2025-01-15T12:00:00Z").is_some());
        assert!(parse_instant(" 2025-01-15T12:00:00+00:00 ").is_some());
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("").is_none());
    }
}
