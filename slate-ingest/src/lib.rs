//! slate-ingest: raw source-record types and the per-source normalizers that
//! map them into canonical tasks.

pub mod normalize;
pub mod types;

pub use normalize::{NormalizeOptions, SourceRecords, normalize_all, parse_instant, stage_for_due, status_for};
pub use types::{
    LmsAssignment, LmsCalendarEvent, LmsCourse, LmsSubmission, ManualEntry, RegistrarEntry,
};
