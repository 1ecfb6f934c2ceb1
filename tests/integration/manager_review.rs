//! Manager workflow: overview across roles and per-user summaries.

use crate::helpers::{seeded_store, thursday};
use dutyboard::report::summarize_users;
use dutyboard::store::ChecklistStore;
use dutyboard::{SummaryStatus, User, build_overview};

#[test]
fn overview_and_summaries_mid_morning() {
    let (mut store, _dir) = seeded_store();
    let now = thursday(9, 45);
    let date = now.date();

    store
        .check_in(date, "floor", "open-till", thursday(8, 2).time(), Some("u-ana"))
        .unwrap();
    store
        .check_in(date, "kitchen", "prep", thursday(7, 10).time(), Some("u-bo"))
        .unwrap();
    let mut retired = User::new("u-dee", "Dee", "floor");
    retired.active = false;
    store.upsert_user(retired).unwrap();

    let tasks = store.tasks(None).unwrap();
    let rows = store.completion_rows(date, None).unwrap();
    let overview = build_overview(&tasks, Some(&rows), now);
    assert_eq!(overview.keys().collect::<Vec<_>>(), vec!["floor", "kitchen"]);

    let users = store.users().unwrap();
    let summaries = summarize_users(&users, &overview);
    assert_eq!(summaries.len(), 3);

    let ana = &summaries[0];
    assert_eq!(ana.user_id, "u-ana");
    assert_eq!((ana.total, ana.done, ana.late), (4, 1, 0));
    assert_eq!(ana.status, SummaryStatus::InProgress);

    let bo = &summaries[1];
    assert_eq!((bo.total, bo.done, bo.late), (2, 1, 1));
    assert_eq!(bo.status, SummaryStatus::Late);

    let cy = &summaries[2];
    assert_eq!(cy.role, "office");
    assert_eq!(cy.status, SummaryStatus::NoTasks);
}

#[test]
fn everything_done_is_complete() {
    let (mut store, _dir) = seeded_store();
    let now = thursday(10, 0);
    for task_id in ["prep", "temps"] {
        store
            .check_in(now.date(), "kitchen", task_id, now.time(), Some("u-bo"))
            .unwrap();
    }
    let tasks = store.tasks(None).unwrap();
    let rows = store.completion_rows(now.date(), None).unwrap();
    let overview = build_overview(&tasks, Some(&rows), now);
    let users = store.users().unwrap();

    let bo = summarize_users(&users, &overview)
        .into_iter()
        .find(|s| s.user_id == "u-bo")
        .unwrap();
    assert_eq!(bo.status, SummaryStatus::Complete);
    assert_eq!(bo.status.to_string(), "complete");
}

#[test]
fn removing_a_task_drops_it_from_boards() {
    let (mut store, _dir) = seeded_store();
    assert!(store.remove_task("temps").unwrap());
    let now = thursday(11, 0);
    let overview = build_overview(&store.tasks(None).unwrap(), None, now);
    assert!(overview["kitchen"].entry("temps").is_none());
    assert_eq!(overview["kitchen"].entries.len(), 1);
}
