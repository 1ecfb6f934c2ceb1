//! Checklist store: the query/update seam to the hosted tables.
//!
//! [`ChecklistStore`] mirrors the three tables the tracker reads and writes
//! (task definitions, daily completion reports, users). [`MemoryStore`] keeps
//! them in memory; [`SnapshotStore`] also persists them as a JSON snapshot,
//! rewritten after every mutation.

use crate::error::{DutyError, Result};
use crate::report::{CompletionRecord, ReportRow, combine_by_role};
use crate::scheduler::sort_in_place;
use crate::task::TaskDefinition;
use crate::users::User;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Query/update interface over the checklist tables.
pub trait ChecklistStore {
    /// Task definitions, optionally filtered by role, ordered by time label.
    fn tasks(&self, role: Option<&str>) -> Result<Vec<TaskDefinition>>;

    /// Insert or replace a task definition. An empty id is assigned a new one.
    /// Returns the stored id.
    fn upsert_task(&mut self, task: TaskDefinition) -> Result<String>;

    /// Delete a task definition. Returns `true` when it existed.
    fn remove_task(&mut self, task_id: &str) -> Result<bool>;

    /// Report rows for `date`, optionally filtered by role.
    fn completion_rows(&self, date: NaiveDate, role: Option<&str>) -> Result<Vec<ReportRow>>;

    /// Insert or replace the report for the record's (role, date).
    fn save_completion(&mut self, record: &CompletionRecord) -> Result<()>;

    /// All users.
    fn users(&self) -> Result<Vec<User>>;

    /// Insert or replace a user. An empty id is assigned a new one.
    /// Returns the stored id.
    fn upsert_user(&mut self, user: User) -> Result<String>;

    /// Delete a user. Returns `true` when it existed.
    fn remove_user(&mut self, user_id: &str) -> Result<bool>;

    /// The completion record for (`role`, `date`), empty when none exists yet.
    fn completion_record(&self, date: NaiveDate, role: &str) -> Result<CompletionRecord> {
        let rows = self.completion_rows(date, Some(role))?;
        let payload = combine_by_role(Some(&rows)).remove(role);
        Ok(match payload {
            Some(payload) => CompletionRecord::from_payload(role, date, payload),
            None => CompletionRecord::new(role, date),
        })
    }

    /// Toggle `task_id` for `role` on `date` and persist the record.
    /// Returns the new done state.
    fn check_in(
        &mut self,
        date: NaiveDate,
        role: &str,
        task_id: &str,
        at: NaiveTime,
        by: Option<&str>,
    ) -> Result<bool> {
        let mut record = self.completion_record(date, role)?;
        let done = record.toggle(task_id, at, by);
        self.save_completion(&record)?;
        debug!("check-in {role}/{task_id} on {date}: done={done}");
        Ok(done)
    }
}

/// Serialized store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Task definitions in insertion order.
    #[serde(default)]
    pub tasks: Vec<TaskDefinition>,
    /// One record per (role, date).
    #[serde(default)]
    pub reports: Vec<CompletionRecord>,
    /// Staff accounts.
    #[serde(default)]
    pub users: Vec<User>,
}

/// In-memory checklist tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: StoreSnapshot,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self { snapshot }
    }

    /// Current contents.
    #[must_use]
    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ChecklistStore for MemoryStore {
    fn tasks(&self, role: Option<&str>) -> Result<Vec<TaskDefinition>> {
        let mut tasks: Vec<TaskDefinition> = self
            .snapshot
            .tasks
            .iter()
            .filter(|t| role.is_none_or(|r| t.role == r))
            .cloned()
            .collect();
        sort_in_place(&mut tasks);
        Ok(tasks)
    }

    fn upsert_task(&mut self, mut task: TaskDefinition) -> Result<String> {
        if task.id.is_empty() {
            task.id = new_id();
        }
        let id = task.id.clone();
        match self.snapshot.tasks.iter_mut().find(|t| t.id == id) {
            Some(existing) => *existing = task,
            None => self.snapshot.tasks.push(task),
        }
        Ok(id)
    }

    fn remove_task(&mut self, task_id: &str) -> Result<bool> {
        let before = self.snapshot.tasks.len();
        self.snapshot.tasks.retain(|t| t.id != task_id);
        Ok(self.snapshot.tasks.len() != before)
    }

    fn completion_rows(&self, date: NaiveDate, role: Option<&str>) -> Result<Vec<ReportRow>> {
        Ok(self
            .snapshot
            .reports
            .iter()
            .filter(|r| r.date == date && role.is_none_or(|role| r.role == role))
            .map(CompletionRecord::to_row)
            .collect())
    }

    fn save_completion(&mut self, record: &CompletionRecord) -> Result<()> {
        match self
            .snapshot
            .reports
            .iter_mut()
            .find(|r| r.date == record.date && r.role == record.role)
        {
            Some(existing) => *existing = record.clone(),
            None => self.snapshot.reports.push(record.clone()),
        }
        Ok(())
    }

    fn users(&self) -> Result<Vec<User>> {
        Ok(self.snapshot.users.clone())
    }

    fn upsert_user(&mut self, mut user: User) -> Result<String> {
        if user.id.is_empty() {
            user.id = new_id();
        }
        let id = user.id.clone();
        match self.snapshot.users.iter_mut().find(|u| u.id == id) {
            Some(existing) => *existing = user,
            None => self.snapshot.users.push(user),
        }
        Ok(id)
    }

    fn remove_user(&mut self, user_id: &str) -> Result<bool> {
        let before = self.snapshot.users.len();
        self.snapshot.users.retain(|u| u.id != user_id);
        Ok(self.snapshot.users.len() != before)
    }
}

/// On-disk format version.
const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default = "default_snapshot_version")]
    version: u8,
    #[serde(flatten)]
    snapshot: StoreSnapshot,
}

fn default_snapshot_version() -> u8 {
    SNAPSHOT_VERSION
}

/// [`MemoryStore`] persisted to a JSON file.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl SnapshotStore {
    /// Open the snapshot at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = load_snapshot(&path)?;
        info!(
            "opened checklist snapshot {} ({} tasks, {} reports, {} users)",
            path.display(),
            snapshot.tasks.len(),
            snapshot.reports.len(),
            snapshot.users.len()
        );
        Ok(Self {
            path,
            inner: MemoryStore::from_snapshot(snapshot),
        })
    }

    /// Snapshot file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents.
    #[must_use]
    pub fn snapshot(&self) -> &StoreSnapshot {
        self.inner.snapshot()
    }

    /// Apply `change` to a copy, write it out, and keep it only if the write
    /// succeeded. A failed write leaves the store as it was.
    fn commit<T>(&mut self, change: impl FnOnce(&mut MemoryStore) -> Result<T>) -> Result<T> {
        let mut staged = self.inner.clone();
        let out = change(&mut staged)?;
        save_snapshot(&self.path, staged.snapshot())?;
        self.inner = staged;
        Ok(out)
    }
}

impl ChecklistStore for SnapshotStore {
    fn tasks(&self, role: Option<&str>) -> Result<Vec<TaskDefinition>> {
        self.inner.tasks(role)
    }

    fn upsert_task(&mut self, task: TaskDefinition) -> Result<String> {
        self.commit(|store| store.upsert_task(task))
    }

    fn remove_task(&mut self, task_id: &str) -> Result<bool> {
        if !self.inner.snapshot().tasks.iter().any(|t| t.id == task_id) {
            return Ok(false);
        }
        self.commit(|store| store.remove_task(task_id))
    }

    fn completion_rows(&self, date: NaiveDate, role: Option<&str>) -> Result<Vec<ReportRow>> {
        self.inner.completion_rows(date, role)
    }

    fn save_completion(&mut self, record: &CompletionRecord) -> Result<()> {
        self.commit(|store| store.save_completion(record))
    }

    fn users(&self) -> Result<Vec<User>> {
        self.inner.users()
    }

    fn upsert_user(&mut self, user: User) -> Result<String> {
        self.commit(|store| store.upsert_user(user))
    }

    fn remove_user(&mut self, user_id: &str) -> Result<bool> {
        if !self.inner.snapshot().users.iter().any(|u| u.id == user_id) {
            return Ok(false);
        }
        self.commit(|store| store.remove_user(user_id))
    }
}

fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    let bytes = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StoreSnapshot::default());
        }
        Err(e) => return Err(DutyError::Store(format!("cannot read snapshot: {e}"))),
    };

    let file: SnapshotFile = serde_json::from_slice(&bytes)
        .map_err(|e| DutyError::Store(format!("cannot parse snapshot: {e}")))?;
    if file.version > SNAPSHOT_VERSION {
        warn!(
            "snapshot {} has version {} (newer than {SNAPSHOT_VERSION}); reading anyway",
            path.display(),
            file.version
        );
    }
    Ok(file.snapshot)
}

fn save_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| DutyError::Store(format!("cannot create snapshot dir: {e}")))?;
    }

    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        snapshot: snapshot.clone(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| DutyError::Store(format!("cannot serialize snapshot: {e}")))?;

    std::fs::write(path, json)
        .map_err(|e| DutyError::Store(format!("cannot write snapshot: {e}")))?;
    debug!("saved checklist snapshot to {}", path.display());
    Ok(())
}
