//! Derived view state over a loaded document.
//!
//! # Responsibility
//! - Compute the lists, filters, and counters dashboard views display.
//!
//! # Invariants
//! - Every function is pure and borrows `ProjectData` read-only.
//! - Missing optional sections count as empty.

pub mod logs;
pub mod overview;
pub mod work;

pub use logs::{recent_log_entries, search_log_entries};
pub use overview::{
    gate_series, history_series, pipeline_ids, unread_notifications, GatePoint, HistoryPoint,
    OverviewStats,
};
pub use work::{
    filter_work_items, search_phases, work_items, WorkFilter, WorkItem, WorkItemKind,
};

/// Case-insensitive containment; a blank needle matches everything.
pub(crate) fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
