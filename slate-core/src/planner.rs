//! Planning engine: one merged task snapshot + "now" in, structured daily
//! context out.
//!
//! Pure and deterministic: same `(tasks, now, preferences)` always yields the
//! same context. The scoring coefficients and thresholds are contract values;
//! downstream consumers depend on the exact boundaries.

use chrono::{DateTime, Timelike, Utc};

use crate::plan::{
    BreakIdea, DayLoad, DaySummary, FocusBlock, PlanningContext, Preferences, RiskLevel,
    RiskyTask, SocialEnergy,
};
use crate::task::{Task, TaskStatus, TaskType};
use crate::time::{combine_date_and_time, free_minutes, hours_until, is_past, is_today, utc_date};

/// Default plannable day used when a preference string fails to parse.
const DEFAULT_WAKE: &str = "08:00";
const DEFAULT_SLEEP: &str = "23:00";

/// Build the daily planning context for `tasks` as of `now`.
pub fn build_planning_context(
    tasks: &[Task],
    now: DateTime<Utc>,
    preferences: &Preferences,
) -> PlanningContext {
    let tasks_today: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            t.start_at.is_some_and(|s| is_today(s, now)) || t.due_at.is_some_and(|d| is_today(d, now))
        })
        .collect();

    let due_today: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_at.is_some_and(|d| is_today(d, now)))
        .collect();

    let events_today: Vec<&Task> = tasks_today
        .iter()
        .copied()
        .filter(|t| matches!(t.task_type, TaskType::Event | TaskType::Lecture | TaskType::Lab))
        .collect();

    let overdue_tasks: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_at.is_some_and(|d| is_past(d, now)) && t.status != TaskStatus::Completed)
        .collect();

    let exams_due_today = due_today.iter().filter(|t| t.task_type == TaskType::Exam).count();
    let score = load_score(due_today.len(), events_today.len(), overdue_tasks.len(), exams_due_today);
    let day_load = load_level(score);

    let free_block_minutes = free_time_today(&events_today, now, preferences);
    let risky_tasks = find_risky_tasks(tasks, now);
    let focus_blocks = build_focus_blocks(free_block_minutes, now, preferences);
    let break_ideas = build_break_ideas(now, preferences);
    let suggested_order = suggest_order(tasks, &risky_tasks);
    let notes_for_coach = coach_notes(tasks, &tasks_today, &due_today, &overdue_tasks, day_load, now);

    let first_due_at = due_today.iter().filter_map(|t| t.due_at).min();

    PlanningContext {
        summary: DaySummary {
            date: utc_date(now),
            day_load,
            total_tasks_today: tasks_today.len(),
            total_due_today: due_today.len(),
            total_overdue: overdue_tasks.len(),
            free_block_minutes,
            first_due_at,
        },
        focus_blocks,
        break_ideas,
        risky_tasks,
        suggested_order,
        notes_for_coach,
    }
}

/// Weighted day-load score. Exams and overdue work cost more than routine
/// meetings.
fn load_score(due_today: usize, events_today: usize, overdue: usize, exams_due_today: usize) -> f64 {
    due_today as f64 * 2.0
        + events_today as f64 * 0.5
        + overdue as f64 * 1.5
        + exams_due_today as f64 * 3.0
}

fn load_level(score: f64) -> DayLoad {
    if score <= 4.0 {
        DayLoad::Chill
    } else if score <= 10.0 {
        DayLoad::Normal
    } else if score <= 18.0 {
        DayLoad::Busy
    } else {
        DayLoad::Cooked
    }
}

/// Free minutes between wake and sleep time after subtracting today's
/// time-boxed events.
fn free_time_today(events_today: &[&Task], now: DateTime<Utc>, preferences: &Preferences) -> i64 {
    let busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = events_today
        .iter()
        .filter_map(|t| Some((t.start_at?, t.end_at?)))
        .collect();

    let date = utc_date(now);
    let day_start = combine_date_and_time(date, &preferences.wake_time)
        .or_else(|| combine_date_and_time(date, DEFAULT_WAKE));
    let day_end = combine_date_and_time(date, &preferences.sleep_time)
        .or_else(|| combine_date_and_time(date, DEFAULT_SLEEP));

    match (day_start, day_end) {
        (Some(start), Some(end)) => free_minutes(&busy, start, end),
        _ => 0,
    }
}

fn cmp_due(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

/// Rank non-completed, dated, non-meeting tasks whose due proximity crosses a
/// risk threshold. High before medium, earlier deadlines first.
fn find_risky_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<RiskyTask> {
    let mut risky = Vec::new();

    for task in tasks {
        if task.status == TaskStatus::Completed || task.task_type.is_class_meeting() {
            continue;
        }
        let Some(due) = task.due_at else { continue };

        let hours = hours_until(due, now);
        let assessment = if is_past(due, now) {
            Some((RiskLevel::High, "Overdue".to_string()))
        } else if hours <= 6.0 {
            Some((RiskLevel::High, format!("Due in {} hours", hours.round())))
        } else if hours <= 24.0 {
            Some((RiskLevel::High, "Due within 24 hours".to_string()))
        } else if hours <= 48.0 {
            Some((RiskLevel::Medium, "Due within 48 hours".to_string()))
        } else if task.task_type == TaskType::Exam && hours <= 72.0 {
            Some((RiskLevel::Medium, "Exam coming up soon".to_string()))
        } else {
            None
        };

        if let Some((risk_level, reason)) = assessment {
            risky.push(RiskyTask {
                task_id: task.id.clone(),
                title: task.title.clone(),
                due_at: task.due_at,
                risk_level,
                reason,
            });
        }
    }

    risky.sort_by(|a, b| {
        b.risk_level
            .cmp(&a.risk_level)
            .then_with(|| cmp_due(a.due_at, b.due_at))
    });
    risky
}

/// Suggest work windows keyed off the total free-minute budget. Blocks that
/// have already started are dropped.
fn build_focus_blocks(free: i64, now: DateTime<Utc>, preferences: &Preferences) -> Vec<FocusBlock> {
    let date = utc_date(now);
    let mut blocks = Vec::new();

    let mut push_block = |gate: i64, slot: &str, window: (&str, &str), label: &str, location: Option<String>| {
        if free < gate {
            return;
        }
        let (Some(start), Some(end)) = (
            combine_date_and_time(date, window.0),
            combine_date_and_time(date, window.1),
        ) else {
            return;
        };
        if start > now {
            blocks.push(FocusBlock {
                id: format!("focus-{slot}-{date}"),
                start_at: start,
                end_at: end,
                label: label.to_string(),
                suggested_location: location,
            });
        }
    };

    push_block(
        90,
        "morning",
        ("09:00", "10:30"),
        "Deep work (morning focus)",
        Some(
            preferences
                .preferred_locations
                .first()
                .cloned()
                .unwrap_or_else(|| "Main library".to_string()),
        ),
    );
    push_block(
        180,
        "afternoon",
        ("14:00", "15:30"),
        "Review and practice",
        Some("Study commons".to_string()),
    );
    push_block(
        240,
        "evening",
        ("19:00", "20:30"),
        "Light review",
        Some(
            preferences
                .preferred_locations
                .get(1)
                .cloned()
                .unwrap_or_else(|| "Union lounge".to_string()),
        ),
    );

    blocks
}

fn build_break_ideas(now: DateTime<Utc>, preferences: &Preferences) -> Vec<BreakIdea> {
    let mut ideas = vec![
        BreakIdea {
            id: "break-walk".to_string(),
            label: "Walk a loop around campus".to_string(),
            duration_minutes: 15,
        },
        BreakIdea {
            id: "break-coffee".to_string(),
            label: "Coffee run".to_string(),
            duration_minutes: 20,
        },
    ];

    match preferences.social_energy {
        SocialEnergy::High => ideas.push(BreakIdea {
            id: "break-social".to_string(),
            label: "Study session with friends".to_string(),
            duration_minutes: 30,
        }),
        SocialEnergy::Low => ideas.push(BreakIdea {
            id: "break-quiet".to_string(),
            label: "Quiet time away from screens".to_string(),
            duration_minutes: 45,
        }),
        SocialEnergy::Medium => {}
    }

    let hour = now.hour();
    if (12..=14).contains(&hour) {
        ideas.push(BreakIdea {
            id: "break-lunch".to_string(),
            label: "Proper lunch away from the desk".to_string(),
            duration_minutes: 45,
        });
    }

    ideas
}

/// Recommended working order over actionable tasks: risky first, exams next,
/// then ascending due date with undated work last.
fn suggest_order(tasks: &[Task], risky: &[RiskyTask]) -> Vec<String> {
    let risky_ids: std::collections::HashSet<&str> =
        risky.iter().map(|r| r.task_id.as_str()).collect();

    let mut actionable: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed && !t.task_type.is_class_meeting())
        .collect();

    actionable.sort_by(|a, b| {
        let a_risky = risky_ids.contains(a.id.as_str());
        let b_risky = risky_ids.contains(b.id.as_str());
        b_risky
            .cmp(&a_risky)
            .then_with(|| {
                let a_exam = a.task_type == TaskType::Exam;
                let b_exam = b.task_type == TaskType::Exam;
                b_exam.cmp(&a_exam)
            })
            .then_with(|| cmp_due(a.due_at, b.due_at))
    });

    actionable.into_iter().map(|t| t.id.clone()).collect()
}

/// Fixed sequence of factual notes about the day. No voice; presentation
/// layers own the tone.
fn coach_notes(
    tasks: &[Task],
    tasks_today: &[&Task],
    due_today: &[&Task],
    overdue: &[&Task],
    day_load: DayLoad,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut notes = Vec::new();

    notes.push(format!("{} total active tasks", tasks.len()));

    if !tasks_today.is_empty() {
        notes.push(format!("{} tasks/events scheduled for today", tasks_today.len()));
    }
    if !due_today.is_empty() {
        notes.push(format!("{} tasks due today", due_today.len()));
    }
    if !overdue.is_empty() {
        notes.push(format!("{} overdue tasks need attention", overdue.len()));
    }

    notes.push(format!("Overall day load: {}", day_load.as_str()));

    let exams_this_week = tasks
        .iter()
        .filter(|t| {
            t.task_type == TaskType::Exam && t.due_at.is_some_and(|d| hours_until(d, now) <= 168.0)
        })
        .count();
    if exams_this_week > 0 {
        notes.push(format!("{} exam(s) within the next week", exams_this_week));
    }

    let next_two_days = tasks
        .iter()
        .filter(|t| t.due_at.is_some_and(|d| hours_until(d, now) <= 48.0))
        .count();
    if next_two_days >= 5 {
        notes.push("Tasks are heavily clustered in the next 48 hours".to_string());
    }

    notes
}
