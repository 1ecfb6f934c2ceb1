//! dutyboard: recurring daily checklists for staff attendance.
//!
//! Staff check off recurring tasks assigned to their role; managers review
//! completion across roles. The crate's core is a small set of pure
//! scheduling rules:
//!
//! - **Recurrence**: which task definitions apply today (daily, weekly, monthly)
//! - **Ordering**: display order by scheduled `HH:MM`, untimed tasks last
//! - **Timing**: whether a task is due or late against a grace buffer
//! - **Reports**: per-role completion records and per-user summaries
//!
//! Persistence is behind [`store::ChecklistStore`]; time comes from an
//! injectable [`clock::Clock`].

pub mod board;
pub mod clock;
pub mod config;
pub mod duty_dirs;
pub mod error;
pub mod photo;
pub mod report;
pub mod scheduler;
pub mod store;
pub mod task;
pub mod users;

pub use board::{Board, BoardEntry, Session, TaskStatus, build_board, build_overview};
pub use config::DutyConfig;
pub use error::{DutyError, Result};
pub use report::{CompletionRecord, ReportRow, SummaryStatus, UserSummary, combine_by_role};
pub use scheduler::{TimeRules, is_visible_today, sort_by_time};
pub use task::{LooseInt, TaskDefinition};
pub use users::{Access, User};
