//! Which recurring tasks apply on a given day.

use crate::task::TaskDefinition;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Recurrence rule of a task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repeat {
    /// Every day. Also used when the repeat type is absent.
    Daily,
    /// One weekday per week.
    Weekly,
    /// One day per month.
    Monthly,
    /// A repeat type this crate does not recognise.
    Other(String),
}

impl Repeat {
    /// Classify a stored `repeat_type` column. Matching is exact.
    #[must_use]
    pub fn from_column(repeat_type: Option<&str>) -> Self {
        match repeat_type {
            None | Some("daily") => Self::Daily,
            Some("weekly") => Self::Weekly,
            Some("monthly") => Self::Monthly,
            Some(other) => Self::Other(other.to_owned()),
        }
    }
}

/// Returns `true` when `task` should appear on the checklist for `now`'s date.
#[must_use]
pub fn is_visible_today(task: &TaskDefinition, now: NaiveDateTime) -> bool {
    is_visible_on(task, now.date())
}

/// Date-only form of [`is_visible_today`].
///
/// Unknown repeat types are shown. Weekly and monthly tasks whose anchor
/// does not parse as an integer are hidden.
#[must_use]
pub fn is_visible_on(task: &TaskDefinition, date: NaiveDate) -> bool {
    let anchor = task.repeat_on.as_ref().and_then(|v| v.as_int());
    match Repeat::from_column(task.repeat_type.as_deref()) {
        Repeat::Daily | Repeat::Other(_) => true,
        Repeat::Weekly => {
            anchor == Some(i64::from(date.weekday().num_days_from_sunday()))
        }
        Repeat::Monthly => anchor == Some(i64::from(date.day())),
    }
}

/// Keep only the tasks visible on `now`'s date, in input order.
#[must_use]
pub fn visible_today(tasks: &[TaskDefinition], now: NaiveDateTime) -> Vec<TaskDefinition> {
    tasks
        .iter()
        .filter(|task| is_visible_today(task, now))
        .cloned()
        .collect()
}
