//! Merging per-source task lists into one collection.
//!
//! Intentionally a plain concatenation: no cross-source dedup, no id-collision
//! detection, no resort. A registrar meeting and a calendar event for the same
//! class session both survive.

use crate::task::Task;

pub fn merge_task_lists(task_lists: Vec<Vec<Task>>) -> Vec<Task> {
    task_lists.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskSource, TaskType};

    #[test]
    fn test_merge_preserves_per_source_order() {
        let a = vec![
            Task::new(TaskSource::Lms, "1", "hw1", TaskType::Assignment),
            Task::new(TaskSource::Lms, "2", "hw2", TaskType::Assignment),
        ];
        let b = vec![Task::new(TaskSource::Manual, "1", "todo", TaskType::Todo)];

        let merged = merge_task_lists(vec![a, b]);
        let ids: Vec<&str> = merged.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["lms-1", "lms-2", "manual-1"]);
    }

    #[test]
    fn test_merge_keeps_lookalike_entries_from_different_sources() {
        // Same real-world class session seen by two sources stays duplicated.
        let event = Task::new(TaskSource::Lms, "event-9", "15-112 Lecture", TaskType::Event);
        let meeting = Task::new(TaskSource::Registrar, "9-2025-01-15", "15-112 Lecture", TaskType::Lecture);

        let merged = merge_task_lists(vec![vec![event], vec![meeting]]);
        assert_eq!(merged.len(), 2);
    }
}
