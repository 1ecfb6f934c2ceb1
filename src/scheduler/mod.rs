//! Checklist scheduling core.
//!
//! Pure functions deciding which recurring tasks apply today, the order they
//! are shown in, and whether each one is due or late. Nothing here performs
//! I/O or returns an error.

pub mod ordering;
pub mod recurrence;
pub mod rules;
pub mod time_label;

pub use ordering::{UNTIMED_SORT_KEY, sort_by_time, sort_in_place};
pub use recurrence::{Repeat, is_visible_on, is_visible_today, visible_today};
pub use rules::{TimeRules, coerce_buffer_minutes, is_due_at, is_late_at};
pub use time_label::TimeLabel;
