//! LMS records (graded coursework + calendar events) to canonical tasks.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::json;

use slate_core::task::{KanbanStage, Task, TaskSource, TaskStatus, TaskType};

use super::{parse_instant, stage_for_due, status_for};
use crate::types::{LmsAssignment, LmsCalendarEvent, LmsCourse};

const EXAM_KEYWORDS: [&str; 5] = ["quiz", "exam", "test", "midterm", "final"];

fn course_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+-\d+").unwrap())
}

/// Exam when the source flags a quiz or the title carries an exam keyword.
pub fn classify_assignment(assignment: &LmsAssignment) -> TaskType {
    if assignment.is_quiz_assignment == Some(true) {
        return TaskType::Exam;
    }
    let name = assignment.name.to_lowercase();
    if EXAM_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        TaskType::Exam
    } else {
        TaskType::Assignment
    }
}

/// Course code: a leading digits-dash-digits token from the code field, then
/// from the display name, else a synthesized `course-<id>`.
pub fn extract_course_code(course: &LmsCourse) -> String {
    if let Some(m) = course_code_re().find(&course.course_code) {
        return m.as_str().to_string();
    }
    if let Some(m) = course_code_re().find(&course.name) {
        return m.as_str().to_string();
    }
    format!("course-{}", course.id)
}

pub fn assignment_to_task(
    assignment: &LmsAssignment,
    course: Option<&LmsCourse>,
    now: DateTime<Utc>,
) -> Task {
    let submitted = assignment
        .submission
        .as_ref()
        .is_some_and(|s| matches!(s.workflow_state.as_str(), "submitted" | "graded"));

    let due_at = assignment.due_at.as_deref().and_then(parse_instant);
    let status = status_for(due_at, submitted, now);
    let kanban_stage = if submitted {
        KanbanStage::Done
    } else {
        stage_for_due(due_at, now)
    };

    let mut task = Task::new(
        TaskSource::Lms,
        &format!("assignment-{}", assignment.id),
        assignment.name.clone(),
        classify_assignment(assignment),
    );
    task.description = assignment.description.clone().filter(|d| !d.is_empty());
    task.course_code = course.map(extract_course_code);
    task.course_name = course.map(|c| c.name.clone());
    task.due_at = due_at;
    task.status = status;
    task.kanban_stage = kanban_stage;
    task.raw_source_id = assignment.id.to_string();
    task.metadata.insert("externalUrl".to_string(), json!(assignment.html_url));
    if let Some(points) = assignment.points_possible {
        task.metadata.insert("pointsPossible".to_string(), json!(points));
    }
    task.metadata
        .insert("submissionTypes".to_string(), json!(assignment.submission_types));
    task.metadata.insert(
        "isQuiz".to_string(),
        json!(assignment.is_quiz_assignment.unwrap_or(false)),
    );
    task
}

/// Calendar events carry no due date; urgency keys off the start time.
pub fn calendar_event_to_task(event: &LmsCalendarEvent, now: DateTime<Utc>) -> Task {
    let start_at = parse_instant(&event.start_at);
    let end_at = event.end_at.as_deref().and_then(parse_instant);

    let mut task = Task::new(
        TaskSource::Lms,
        &format!("event-{}", event.id),
        event.title.clone(),
        TaskType::Event,
    );
    task.description = event.description.clone().filter(|d| !d.is_empty());
    task.start_at = start_at;
    task.end_at = end_at;
    task.location = event
        .location_name
        .clone()
        .or_else(|| event.location_address.clone())
        .filter(|l| !l.is_empty());
    task.status = TaskStatus::Pending;
    task.kanban_stage = stage_for_due(start_at, now);
    task.raw_source_id = event.id.to_string();
    if let Some(code) = &event.context_code {
        task.metadata.insert("contextCode".to_string(), json!(code));
    }
    task.metadata
        .insert("allDay".to_string(), json!(event.all_day.unwrap_or(false)));
    task
}
