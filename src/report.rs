//! Daily completion reports.
//!
//! One completion record exists per (role, report date). Its payload maps
//! task ids to completion entries:
//!
//! ```json
//! { "open-register": { "done": true, "done_at": "08:03:11", "done_by": "u1",
//!                      "photo": "photos/u1/2024-03-14.jpg" } }
//! ```
//!
//! A bare boolean is accepted as an entry. Fields this crate does not know
//! about are preserved when an entry is updated.

use crate::board::Board;
use crate::users::User;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One stored report row as fetched for a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Role the row belongs to.
    pub role: String,
    /// Completion payload.
    #[serde(default)]
    pub data: Value,
}

impl ReportRow {
    /// Build a row.
    pub fn new(role: impl Into<String>, data: Value) -> Self {
        Self {
            role: role.into(),
            data,
        }
    }
}

/// Combine report rows into one payload per role.
///
/// When a role appears twice the later row replaces the earlier one; payloads
/// are not merged. `None` yields an empty map.
#[must_use]
pub fn combine_by_role(rows: Option<&[ReportRow]>) -> BTreeMap<String, Value> {
    let mut combined = BTreeMap::new();
    for row in rows.unwrap_or_default() {
        combined.insert(row.role.clone(), row.data.clone());
    }
    combined
}

/// Read view of one task's completion entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Whether the task is marked done.
    pub done: bool,
    /// Local time of check-in (`HH:MM:SS`).
    pub done_at: Option<String>,
    /// User who checked the task in.
    pub done_by: Option<String>,
    /// Uploaded photo reference.
    pub photo: Option<String>,
}

impl Completion {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(done) => Some(Self {
                done: *done,
                ..Self::default()
            }),
            Value::Object(fields) => {
                let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
                Some(Self {
                    done: fields.get("done").and_then(Value::as_bool).unwrap_or(false),
                    done_at: text("done_at"),
                    done_by: text("done_by"),
                    photo: text("photo"),
                })
            }
            _ => None,
        }
    }
}

/// The completion record for one role on one report date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Role the record belongs to.
    pub role: String,
    /// Report date.
    pub date: NaiveDate,
    /// Task id to completion entry.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl CompletionRecord {
    /// An empty record, as created on first check-in.
    pub fn new(role: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            role: role.into(),
            date,
            data: Map::new(),
        }
    }

    /// Wrap a fetched payload. Non-object payloads are treated as empty.
    pub fn from_payload(role: impl Into<String>, date: NaiveDate, payload: Value) -> Self {
        let data = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            role: role.into(),
            date,
            data,
        }
    }

    /// The payload as stored.
    #[must_use]
    pub fn payload(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// This record as a report row.
    #[must_use]
    pub fn to_row(&self) -> ReportRow {
        ReportRow::new(self.role.clone(), self.payload())
    }

    /// Completion entry for `task_id`, if one is recorded.
    #[must_use]
    pub fn completion(&self, task_id: &str) -> Option<Completion> {
        self.data.get(task_id).and_then(Completion::from_value)
    }

    /// Whether `task_id` is marked done.
    #[must_use]
    pub fn is_done(&self, task_id: &str) -> bool {
        self.completion(task_id).is_some_and(|c| c.done)
    }

    /// Number of tasks marked done.
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.data
            .values()
            .filter_map(Completion::from_value)
            .filter(|c| c.done)
            .count()
    }

    /// Mark `task_id` done at local time `at`.
    pub fn mark_done(&mut self, task_id: &str, at: NaiveTime, by: Option<&str>) {
        self.update_entry(task_id, |entry| {
            entry.insert("done".to_owned(), Value::Bool(true));
            entry.insert(
                "done_at".to_owned(),
                Value::String(at.format("%H:%M:%S").to_string()),
            );
            match by {
                Some(user_id) => {
                    entry.insert("done_by".to_owned(), Value::String(user_id.to_owned()));
                }
                None => {
                    entry.remove("done_by");
                }
            }
        });
    }

    /// Clear the done flag for `task_id`. Attached photos are kept.
    pub fn mark_undone(&mut self, task_id: &str) {
        self.update_entry(task_id, |entry| {
            entry.insert("done".to_owned(), Value::Bool(false));
            entry.remove("done_at");
            entry.remove("done_by");
        });
    }

    /// Flip `task_id` and return the new done state.
    pub fn toggle(&mut self, task_id: &str, at: NaiveTime, by: Option<&str>) -> bool {
        if self.is_done(task_id) {
            self.mark_undone(task_id);
            false
        } else {
            self.mark_done(task_id, at, by);
            true
        }
    }

    /// Record an uploaded photo reference against `task_id`.
    pub fn attach_photo(&mut self, task_id: &str, photo: impl Into<String>) {
        let photo = photo.into();
        self.update_entry(task_id, |entry| {
            entry.insert("photo".to_owned(), Value::String(photo));
        });
    }

    fn update_entry(&mut self, task_id: &str, update: impl FnOnce(&mut Map<String, Value>)) {
        let mut fields = match self.data.remove(task_id) {
            Some(Value::Object(fields)) => fields,
            Some(Value::Bool(done)) => {
                let mut fields = Map::new();
                fields.insert("done".to_owned(), Value::Bool(done));
                fields
            }
            _ => Map::new(),
        };
        update(&mut fields);
        self.data.insert(task_id.to_owned(), Value::Object(fields));
    }
}

/// Overall standing of one user's checklist for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    /// Nothing scheduled for the user's role today.
    NoTasks,
    /// Nothing done yet and nothing late.
    NotStarted,
    /// Some tasks done, none late.
    InProgress,
    /// At least one task is past its deadline.
    Late,
    /// Every visible task is done.
    Complete,
}

impl std::fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NoTasks => "no tasks",
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Late => "late",
            Self::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// Per-user completion summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
    pub role: String,
    /// Tasks visible today.
    pub total: usize,
    pub done: usize,
    pub late: usize,
    /// Reached their scheduled time but still within the grace buffer.
    pub due: usize,
    /// Upcoming or unscheduled.
    pub pending: usize,
    pub status: SummaryStatus,
}

/// Summarise `board` for `user`.
#[must_use]
pub fn summarize_user(user: &User, board: &Board) -> UserSummary {
    let counts = board.counts();
    let status = if counts.total == 0 {
        SummaryStatus::NoTasks
    } else if counts.done == counts.total {
        SummaryStatus::Complete
    } else if counts.late > 0 {
        SummaryStatus::Late
    } else if counts.done > 0 {
        SummaryStatus::InProgress
    } else {
        SummaryStatus::NotStarted
    };
    UserSummary {
        user_id: user.id.clone(),
        name: user.name.clone(),
        role: user.role.clone(),
        total: counts.total,
        done: counts.done,
        late: counts.late,
        due: counts.due,
        pending: counts.pending,
        status,
    }
}

/// Summaries for every active user, using the board of their role.
///
/// Users whose role has no board are reported as [`SummaryStatus::NoTasks`].
#[must_use]
pub fn summarize_users(users: &[User], boards: &BTreeMap<String, Board>) -> Vec<UserSummary> {
    users
        .iter()
        .filter(|user| user.active)
        .map(|user| match boards.get(&user.role) {
            Some(board) => summarize_user(user, board),
            None => UserSummary {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role.clone(),
                total: 0,
                done: 0,
                late: 0,
                due: 0,
                pending: 0,
                status: SummaryStatus::NoTasks,
            },
        })
        .collect()
}
