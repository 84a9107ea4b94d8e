//! Manually entered todos to canonical tasks.

use chrono::{DateTime, Utc};

use slate_core::task::{KanbanStage, Priority, Task, TaskSource, TaskType};
use slate_core::time::local_to_utc;

use super::{parse_instant, stage_for_due, status_for};
use crate::types::ManualEntry;

fn parse_priority(raw: &str) -> Option<Priority> {
    match raw.trim().to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

/// RFC 3339 due date preferred; otherwise local wall clock + IANA timezone.
fn due_instant(entry: &ManualEntry) -> Option<DateTime<Utc>> {
    if let Some(due) = entry.due_at.as_deref().and_then(parse_instant) {
        return Some(due);
    }
    let local = entry.due_local.as_deref()?;
    let tz = entry.timezone.as_deref().unwrap_or("UTC");
    local_to_utc(local, tz).ok()
}

pub fn entry_to_task(entry: &ManualEntry, now: DateTime<Utc>) -> Task {
    let due_at = due_instant(entry);

    let mut task = Task::new(TaskSource::Manual, &entry.id, entry.title.clone(), TaskType::Todo);
    task.description = entry.notes.clone().filter(|n| !n.is_empty());
    task.due_at = due_at;
    // The completed flag is the user's own submitted-state report.
    task.status = status_for(due_at, entry.completed, now);
    task.kanban_stage = if entry.completed {
        KanbanStage::Done
    } else {
        stage_for_due(due_at, now)
    };
    task.priority = entry.priority.as_deref().and_then(parse_priority);
    task.raw_source_id = entry.id.clone();
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use slate_core::task::TaskStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn todo() -> ManualEntry {
        ManualEntry {
            id: "42".to_string(),
            title: "Buy textbook".to_string(),
            notes: None,
            due_at: None,
            due_local: None,
            timezone: None,
            priority: None,
            completed: false,
        }
    }

    #[test]
    fn test_undated_todo_is_pending_brain_dump() {
        let task = entry_to_task(&todo(), now());
        assert_eq!(task.id, "manual-42");
        assert_eq!(task.task_type, TaskType::Todo);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.kanban_stage, KanbanStage::BrainDump);
        assert_eq!(task.due_at, None);
    }

    #[test]
    fn test_completed_flag_wins() {
        let mut e = todo();
        e.completed = true;
        e.due_at = Some("2025-01-10T12:00:00Z".to_string()); // long past
        let task = entry_to_task(&e, now());
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.kanban_stage, KanbanStage::Done);
    }

    #[test]
    fn test_due_local_with_timezone() {
        let mut e = todo();
        e.due_local = Some("2025-01-16 23:59".to_string());
        e.timezone = Some("America/Chicago".to_string());
        let task = entry_to_task(&e, now());
        // CST is UTC-6 in January.
        assert_eq!(task.due_at, Some(Utc.with_ymd_and_hms(2025, 1, 17, 5, 59, 0).unwrap()));
        assert_eq!(task.kanban_stage, KanbanStage::KindaUrgent);
    }

    #[test]
    fn test_rfc3339_preferred_over_local() {
        let mut e = todo();
        e.due_at = Some("2025-01-20T12:00:00Z".to_string());
        e.due_local = Some("2025-01-16 09:00".to_string());
        let task = entry_to_task(&e, now());
        assert_eq!(task.due_at, Some(Utc.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_priority_parsing_lenient() {
        let mut e = todo();
        e.priority = Some("HIGH".to_string());
        assert_eq!(entry_to_task(&e, now()).priority, Some(Priority::High));

        e.priority = Some("whenever".to_string());
        assert_eq!(entry_to_task(&e, now()).priority, None);
    }

    #[test]
    fn test_malformed_due_never_overdue() {
        let mut e = todo();
        e.due_at = Some("garbage".to_string());
        let task = entry_to_task(&e, now());
        assert_eq!(task.due_at, None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.kanban_stage, KanbanStage::BrainDump);
    }
}
