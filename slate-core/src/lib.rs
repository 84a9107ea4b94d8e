//! slate-core: canonical task model, time utilities, and the daily planning
//! engine.
//!
//! Pure computation only: callers supply already-normalized tasks and an
//! explicit "now"; nothing here does I/O or reads a clock.

pub mod merge;
pub mod plan;
pub mod planner;
pub mod task;
pub mod time;

pub use merge::merge_task_lists;
pub use plan::{
    BreakIdea, DayLoad, DaySummary, FocusBlock, PlanningContext, Preferences, RiskLevel,
    RiskyTask, SocialEnergy,
};
pub use planner::build_planning_context;
pub use task::{KANBAN_STAGES, KanbanStage, Metadata, Priority, Task, TaskSource, TaskStatus, TaskType};
