//! Shared helpers for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use dutyboard::store::{ChecklistStore, SnapshotStore};
use dutyboard::{Access, TaskDefinition, User};

/// 2024-03-14 (a Thursday) at `h:m`.
pub(crate) fn thursday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 14)
        .expect("valid date")
        .and_hms_opt(h, m, 0)
        .expect("valid time")
}

/// A snapshot store in a temp dir seeded with a small café roster.
pub(crate) fn seeded_store() -> (SnapshotStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut store = SnapshotStore::open(dir.path().join("checklist.json")).expect("open store");

    let tasks = [
        TaskDefinition::new("open-till", "floor", "Open till")
            .at("08:00")
            .with_late_buffer(10),
        TaskDefinition::new("wipe-tables", "floor", "Wipe tables"),
        TaskDefinition::new("close-till", "floor", "Close till").at("21:30"),
        TaskDefinition::new("deep-clean", "floor", "Deep clean").at("15:00").weekly("4"),
        TaskDefinition::new("inventory", "floor", "Inventory").at("11:00").monthly(1),
        TaskDefinition::new("prep", "kitchen", "Prep vegetables").at("07:00"),
        TaskDefinition::new("temps", "kitchen", "Log fridge temps")
            .at("09:00")
            .with_late_buffer("30"),
    ];
    for task in tasks {
        store.upsert_task(task).expect("seed task");
    }

    let users = [
        User::new("u-ana", "Ana", "floor"),
        User::new("u-bo", "Bo", "kitchen"),
        User::new("u-cy", "Cy", "office").with_access(Access::Manager),
    ];
    for user in users {
        store.upsert_user(user).expect("seed user");
    }
    (store, dir)
}
