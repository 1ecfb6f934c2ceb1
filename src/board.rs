//! A role's checklist for one day.
//!
//! [`build_board`] runs the scheduling core end to end: filter the role's
//! task definitions to today's, order them by time, and classify each against
//! the role's completion record. [`Session`] carries the signed-in user and
//! report date so the core functions never see UI state.

use crate::report::{Completion, CompletionRecord, ReportRow, combine_by_role};
use crate::scheduler::ordering::{TimeLabeled, sort_in_place};
use crate::scheduler::{is_due_at, is_late_at, is_visible_today};
use crate::task::TaskDefinition;
use crate::users::User;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Signed-in context passed explicitly instead of held globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub report_date: NaiveDate,
}

impl Session {
    /// Session for `user` on the date of `now`.
    pub fn new(user: User, now: NaiveDateTime) -> Self {
        Self {
            user,
            report_date: now.date(),
        }
    }

    /// Role whose checklist the session works.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.user.role
    }

    /// Move the report date to `now`'s date. Returns whether it changed.
    pub fn roll_over(&mut self, now: NaiveDateTime) -> bool {
        let today = now.date();
        if self.report_date == today {
            return false;
        }
        debug!(
            "session for {} rolled over from {} to {}",
            self.user.id, self.report_date, today
        );
        self.report_date = today;
        true
    }
}

/// Classification of one task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Marked done.
    Done,
    /// Past scheduled time plus grace buffer.
    Late,
    /// Scheduled time reached, still inside the grace buffer.
    Due,
    /// Scheduled later today.
    Upcoming,
    /// No valid scheduled time.
    Unscheduled,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Done => "DONE",
            Self::Late => "LATE",
            Self::Due => "DUE",
            Self::Upcoming => "upcoming",
            Self::Unscheduled => "anytime",
        };
        f.write_str(label)
    }
}

/// Classify one task at `now`.
#[must_use]
pub fn classify(task: &TaskDefinition, is_done: bool, now: NaiveDateTime) -> TaskStatus {
    let label = task.time_label.as_deref();
    if is_done {
        TaskStatus::Done
    } else if is_late_at(now, label, task.buffer_minutes(), false) {
        TaskStatus::Late
    } else if is_due_at(now, label, false) {
        TaskStatus::Due
    } else if task.scheduled_time().is_some() {
        TaskStatus::Upcoming
    } else {
        TaskStatus::Unscheduled
    }
}

/// One row of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub task: TaskDefinition,
    pub status: TaskStatus,
    /// Recorded completion entry, if any.
    pub completion: Option<Completion>,
}

impl BoardEntry {
    /// Whether the task is marked done.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

impl TimeLabeled for BoardEntry {
    fn time_label(&self) -> Option<&str> {
        self.task.time_label.as_deref()
    }
}

/// Tally of board entries by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCounts {
    pub total: usize,
    pub done: usize,
    pub late: usize,
    pub due: usize,
    /// Upcoming plus unscheduled.
    pub pending: usize,
}

/// A role's checklist for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub role: String,
    pub date: NaiveDate,
    /// Entries in display order.
    pub entries: Vec<BoardEntry>,
}

impl Board {
    /// Tally entries by status.
    #[must_use]
    pub fn counts(&self) -> BoardCounts {
        let mut counts = BoardCounts {
            total: self.entries.len(),
            ..BoardCounts::default()
        };
        for entry in &self.entries {
            match entry.status {
                TaskStatus::Done => counts.done += 1,
                TaskStatus::Late => counts.late += 1,
                TaskStatus::Due => counts.due += 1,
                TaskStatus::Upcoming | TaskStatus::Unscheduled => counts.pending += 1,
            }
        }
        counts
    }

    /// Entry for `task_id`.
    #[must_use]
    pub fn entry(&self, task_id: &str) -> Option<&BoardEntry> {
        self.entries.iter().find(|e| e.task.id == task_id)
    }
}

/// Build `role`'s board at `now`.
///
/// Tasks assigned to other roles are ignored. A missing record means nothing
/// has been checked in yet; so does a record for any date other than
/// `now`'s.
#[must_use]
pub fn build_board(
    role: &str,
    tasks: &[TaskDefinition],
    record: Option<&CompletionRecord>,
    now: NaiveDateTime,
) -> Board {
    let record = record.filter(|r| r.date == now.date());
    let mut entries: Vec<BoardEntry> = tasks
        .iter()
        .filter(|task| task.role == role && is_visible_today(task, now))
        .map(|task| {
            let completion = record.and_then(|r| r.completion(&task.id));
            let done = completion.as_ref().is_some_and(|c| c.done);
            BoardEntry {
                task: task.clone(),
                status: classify(task, done, now),
                completion,
            }
        })
        .collect();
    sort_in_place(&mut entries);
    Board {
        role: role.to_owned(),
        date: now.date(),
        entries,
    }
}

/// The signed-in user's board.
///
/// The session's report date follows `now` across midnight, and a record
/// left over from the previous date counts for nothing.
pub fn session_board(
    session: &mut Session,
    tasks: &[TaskDefinition],
    record: Option<&CompletionRecord>,
    now: NaiveDateTime,
) -> Board {
    session.roll_over(now);
    build_board(session.role(), tasks, record, now)
}

/// Boards for every role that has tasks, keyed by role.
///
/// `rows` are the report rows for `now`'s date; duplicate roles resolve to the
/// last row.
#[must_use]
pub fn build_overview(
    tasks: &[TaskDefinition],
    rows: Option<&[ReportRow]>,
    now: NaiveDateTime,
) -> BTreeMap<String, Board> {
    let date = now.date();
    let records: BTreeMap<String, CompletionRecord> = combine_by_role(rows)
        .into_iter()
        .map(|(role, payload)| {
            let record = CompletionRecord::from_payload(role.clone(), date, payload);
            (role, record)
        })
        .collect();

    let mut roles: Vec<&str> = tasks.iter().map(|t| t.role.as_str()).collect();
    roles.sort_unstable();
    roles.dedup();

    let overview: BTreeMap<String, Board> = roles
        .into_iter()
        .map(|role| {
            let board = build_board(role, tasks, records.get(role), now);
            (role.to_owned(), board)
        })
        .collect();
    debug!(
        "built overview for {} roles from {} task definitions",
        overview.len(),
        tasks.len()
    );
    overview
}
