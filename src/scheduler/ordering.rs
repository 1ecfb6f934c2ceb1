//! Display ordering of checklist items by scheduled time.

use crate::task::TaskDefinition;

/// Sort key used for items without a scheduled time, so they land last.
pub const UNTIMED_SORT_KEY: &str = "23:59";

/// Anything that carries a raw `HH:MM` time label.
pub trait TimeLabeled {
    /// Raw label as stored, if any.
    fn time_label(&self) -> Option<&str>;
}

impl TimeLabeled for TaskDefinition {
    fn time_label(&self) -> Option<&str> {
        self.time_label.as_deref()
    }
}

fn sort_key<T: TimeLabeled>(item: &T) -> &str {
    match item.time_label() {
        Some(label) if !label.is_empty() => label,
        _ => UNTIMED_SORT_KEY,
    }
}

/// Stable ascending sort by raw label, compared as strings.
///
/// Zero-padded `HH:MM` sorts chronologically under string comparison.
pub fn sort_in_place<T: TimeLabeled>(items: &mut [T]) {
    items.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
}

/// Sorted copy of `items`; the input is left untouched.
#[must_use]
pub fn sort_by_time<T: TimeLabeled + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_in_place(&mut sorted);
    sorted
}
