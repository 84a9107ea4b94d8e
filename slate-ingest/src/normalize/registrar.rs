//! Registrar schedule entries to one task per concrete class meeting.

use chrono::{NaiveDate, Weekday};
use serde_json::json;

use slate_core::task::{KanbanStage, Task, TaskSource, TaskType};
use slate_core::time::{combine_date_and_time, local_to_utc, weekly_occurrences};

use crate::types::RegistrarEntry;

/// Weekday-letter code: R is Thursday, U is Sunday. Unrecognized characters
/// are skipped.
pub fn parse_weekday_code(days: &str) -> Vec<Weekday> {
    days.chars()
        .filter_map(|c| match c {
            'M' => Some(Weekday::Mon),
            'T' => Some(Weekday::Tue),
            'W' => Some(Weekday::Wed),
            'R' => Some(Weekday::Thu),
            'F' => Some(Weekday::Fri),
            'S' => Some(Weekday::Sat),
            'U' => Some(Weekday::Sun),
            _ => None,
        })
        .collect()
}

fn meeting_task_type(label: &str) -> TaskType {
    match label {
        "Lab" => TaskType::Lab,
        "Recitation" => TaskType::Recitation,
        _ => TaskType::Lecture,
    }
}

/// Expand a recurring entry into per-occurrence tasks over `[window_start,
/// window_end]`. Meetings are schedule fixtures: always `BrainDump`, never
/// urgent, never due.
pub fn entry_to_tasks(entry: &RegistrarEntry, window_start: NaiveDate, window_end: NaiveDate) -> Vec<Task> {
    let weekdays = parse_weekday_code(&entry.days);
    let task_type = meeting_task_type(&entry.meeting_type);

    weekly_occurrences(&weekdays, window_start, window_end)
        .into_iter()
        .map(|date| {
            let start_at = meeting_instant(entry, date, &entry.start_time);
            let end_at = meeting_instant(entry, date, &entry.end_time);

            let mut task = Task::new(
                TaskSource::Registrar,
                &format!("{}-{}", entry.id, date),
                format!("{} {}", entry.course_code, entry.meeting_type),
                task_type,
            );
            task.description = Some(entry.course_title.clone());
            task.course_code = Some(entry.course_code.clone());
            task.course_name = Some(entry.course_title.clone());
            task.start_at = start_at;
            task.end_at = end_at;
            task.location = Some(entry.location.clone()).filter(|l| !l.is_empty());
            task.kanban_stage = KanbanStage::BrainDump;
            task.raw_source_id = entry.id.clone();
            if let Some(section) = &entry.section {
                task.metadata.insert("section".to_string(), json!(section));
            }
            if let Some(instructor) = &entry.instructor {
                task.metadata.insert("instructor".to_string(), json!(instructor));
            }
            if let Some(units) = entry.units {
                task.metadata.insert("units".to_string(), json!(units));
            }
            task.metadata
                .insert("meetingType".to_string(), json!(entry.meeting_type));
            task
        })
        .collect()
}

/// Campus-local "HH:MM" on a concrete date, as UTC. Unparseable times (or an
/// unknown timezone) leave the occurrence unboxed rather than failing it.
fn meeting_instant(
    entry: &RegistrarEntry,
    date: NaiveDate,
    time: &str,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match &entry.timezone {
        Some(tz) => local_to_utc(&format!("{date} {time}"), tz).ok(),
        None => combine_date_and_time(date, time),
    }
}
