//! Due and late evaluation for scheduled checklist items.
//!
//! Every invalid input maps to `false`: a malformed or missing time label is
//! never due and never late, and a finished task is neither.

use crate::clock::Clock;
use crate::scheduler::time_label::TimeLabel;
use crate::task::LooseInt;
use chrono::{Duration, NaiveDateTime};

/// Returns `true` once `now` has reached today's scheduled time.
#[must_use]
pub fn is_due_at(now: NaiveDateTime, time_label: Option<&str>, is_done: bool) -> bool {
    if is_done {
        return false;
    }
    match TimeLabel::parse_opt(time_label) {
        Some(label) => now >= label.on(now.date()),
        None => false,
    }
}

/// Returns `true` when `now` is strictly past the scheduled time plus the
/// grace buffer.
#[must_use]
pub fn is_late_at(
    now: NaiveDateTime,
    time_label: Option<&str>,
    buffer_minutes: u32,
    is_done: bool,
) -> bool {
    if is_done {
        return false;
    }
    let Some(label) = TimeLabel::parse_opt(time_label) else {
        return false;
    };
    let scheduled = label.on(now.date());
    match scheduled.checked_add_signed(Duration::minutes(i64::from(buffer_minutes))) {
        Some(deadline) => now > deadline,
        None => false,
    }
}

/// Coerce a stored buffer column to whole minutes.
///
/// Absent or non-numeric values become 0; negative values clamp to 0.
#[must_use]
pub fn coerce_buffer_minutes(raw: Option<&LooseInt>) -> u32 {
    raw.and_then(LooseInt::as_int)
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Due/late checks that read the current time from a [`Clock`].
///
/// Each call re-reads the clock, so two calls at different instants can
/// disagree. Use [`is_due_at`] / [`is_late_at`] to pin the instant.
#[derive(Debug, Clone, Default)]
pub struct TimeRules<C> {
    clock: C,
}

impl<C: Clock> TimeRules<C> {
    /// Wrap a clock.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Current instant according to the wrapped clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// See [`is_due_at`].
    pub fn is_due(&self, time_label: Option<&str>, is_done: bool) -> bool {
        is_due_at(self.clock.now(), time_label, is_done)
    }

    /// See [`is_late_at`]. The buffer is coerced with [`coerce_buffer_minutes`].
    pub fn is_late(&self, time_label: Option<&str>, buffer: Option<&LooseInt>, is_done: bool) -> bool {
        is_late_at(
            self.clock.now(),
            time_label,
            coerce_buffer_minutes(buffer),
            is_done,
        )
    }
}
