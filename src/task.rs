//! Checklist task definitions.
//!
//! Task rows arrive from the hosted store with loosely typed columns:
//! `repeat_on` and `late_buffer_minutes` may be strings or numbers. They are
//! kept as [`LooseInt`] and coerced only when a rule needs them.

use crate::scheduler::time_label::TimeLabel;
use serde::{Deserialize, Serialize};

/// An integer column that may have been stored as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    /// Stored as an integer.
    Int(i64),
    /// Stored as a floating-point number.
    Float(f64),
    /// Stored as text.
    Text(String),
    /// Any other JSON shape (boolean, array, object). Never an integer.
    Other(serde_json::Value),
}

impl LooseInt {
    /// Best-effort integer value.
    ///
    /// Text takes an optional sign followed by the leading run of digits
    /// after surrounding whitespace (`" 3rd"` is 3, `"abc"` is `None`).
    /// Floats truncate toward zero.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => parse_int_prefix(s),
            Self::Other(_) => None,
        }
    }
}

impl From<i64> for LooseInt {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for LooseInt {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for LooseInt {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// A recurring checklist item assigned to a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Unique task identifier.
    pub id: String,
    /// Role the task is assigned to (e.g. `"barista"`).
    pub role: String,
    /// Short display title.
    #[serde(default)]
    pub title: String,
    /// Optional longer instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scheduled local time as `HH:MM`, if any.
    #[serde(default)]
    pub time_label: Option<String>,
    /// `daily`, `weekly`, `monthly`; absent means daily.
    #[serde(default)]
    pub repeat_type: Option<String>,
    /// Weekday (0 = Sunday) or day of month, depending on `repeat_type`.
    #[serde(default)]
    pub repeat_on: Option<LooseInt>,
    /// Grace minutes after the scheduled time before the task counts as late.
    #[serde(default)]
    pub late_buffer_minutes: Option<LooseInt>,
}

impl TaskDefinition {
    /// Create an untimed daily task.
    pub fn new(id: impl Into<String>, role: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            title: title.into(),
            description: None,
            time_label: None,
            repeat_type: None,
            repeat_on: None,
            late_buffer_minutes: None,
        }
    }

    /// Schedule the task at `label` (`HH:MM`).
    #[must_use]
    pub fn at(mut self, label: impl Into<String>) -> Self {
        self.time_label = Some(label.into());
        self
    }

    /// Repeat weekly on `weekday` (0 = Sunday).
    #[must_use]
    pub fn weekly(mut self, weekday: impl Into<LooseInt>) -> Self {
        self.repeat_type = Some("weekly".to_owned());
        self.repeat_on = Some(weekday.into());
        self
    }

    /// Repeat monthly on `day` (1-based).
    #[must_use]
    pub fn monthly(mut self, day: impl Into<LooseInt>) -> Self {
        self.repeat_type = Some("monthly".to_owned());
        self.repeat_on = Some(day.into());
        self
    }

    /// Allow `minutes` of grace before the task is late.
    #[must_use]
    pub fn with_late_buffer(mut self, minutes: impl Into<LooseInt>) -> Self {
        self.late_buffer_minutes = Some(minutes.into());
        self
    }

    /// Parsed scheduled time; `None` when absent or malformed.
    #[must_use]
    pub fn scheduled_time(&self) -> Option<TimeLabel> {
        TimeLabel::parse_opt(self.time_label.as_deref())
    }

    /// Grace buffer in minutes, coerced from the stored column.
    #[must_use]
    pub fn buffer_minutes(&self) -> u32 {
        crate::scheduler::rules::coerce_buffer_minutes(self.late_buffer_minutes.as_ref())
    }
}
