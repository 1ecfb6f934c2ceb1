//! Staff workflow: load today's board, check tasks in, reload from disk.

use crate::helpers::{seeded_store, thursday};
use dutyboard::store::{ChecklistStore, SnapshotStore};
use dutyboard::{TaskStatus, build_board};

#[test]
fn floor_board_for_thursday_morning() {
    let (store, _dir) = seeded_store();
    let now = thursday(8, 20);
    let tasks = store.tasks(Some("floor")).unwrap();
    let record = store.completion_record(now.date(), "floor").unwrap();
    let board = build_board("floor", &tasks, Some(&record), now);

    let rows: Vec<(&str, TaskStatus)> = board
        .entries
        .iter()
        .map(|e| (e.task.id.as_str(), e.status))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("open-till", TaskStatus::Late),
            ("deep-clean", TaskStatus::Upcoming),
            ("close-till", TaskStatus::Upcoming),
            ("wipe-tables", TaskStatus::Unscheduled),
        ]
    );
}

#[test]
fn check_in_survives_reopen() {
    let (mut store, dir) = seeded_store();
    let now = thursday(8, 5);
    let done = store
        .check_in(now.date(), "floor", "open-till", now.time(), Some("u-ana"))
        .unwrap();
    assert!(done);
    drop(store);

    let store = SnapshotStore::open(dir.path().join("checklist.json")).unwrap();
    let later = thursday(12, 0);
    let tasks = store.tasks(Some("floor")).unwrap();
    let record = store.completion_record(later.date(), "floor").unwrap();
    let board = build_board("floor", &tasks, Some(&record), later);

    let open = board.entry("open-till").unwrap();
    assert_eq!(open.status, TaskStatus::Done);
    let completion = open.completion.as_ref().unwrap();
    assert_eq!(completion.done_at.as_deref(), Some("08:05:00"));
    assert_eq!(completion.done_by.as_deref(), Some("u-ana"));
}

#[test]
fn record_is_per_date() {
    let (mut store, _dir) = seeded_store();
    let today = thursday(8, 5);
    store
        .check_in(today.date(), "floor", "open-till", today.time(), None)
        .unwrap();

    let tomorrow = today + chrono::Duration::days(1);
    let record = store.completion_record(tomorrow.date(), "floor").unwrap();
    assert!(!record.is_done("open-till"));
}

#[test]
fn weekly_task_hidden_on_other_days() {
    let (store, _dir) = seeded_store();
    let friday = thursday(16, 0) + chrono::Duration::days(1);
    let tasks = store.tasks(Some("floor")).unwrap();
    let board = build_board("floor", &tasks, None, friday);
    assert!(board.entry("deep-clean").is_none());
    assert_eq!(board.entries.len(), 3);
}
