//! Print today's checklist for a role.
//!
//! Usage: `dutyboard [--config PATH] <role>`
//!
//! Reads the checklist snapshot named in the config (or the platform default)
//! and prints each visible task with its due/late status. Logs go to stderr.

use dutyboard::clock::{Clock, SystemClock};
use dutyboard::store::{ChecklistStore, SnapshotStore};
use dutyboard::{DutyConfig, build_board};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut role: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                eprintln!("usage: dutyboard [--config PATH] <role>");
                return Ok(());
            }
            _ => role = Some(arg),
        }
    }
    let role = role.ok_or_else(|| anyhow::anyhow!("usage: dutyboard [--config PATH] <role>"))?;

    let config = match config_path {
        Some(path) => DutyConfig::from_file(&path)?,
        None => DutyConfig::load_or_default(&DutyConfig::default_config_path())?,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    let store = SnapshotStore::open(config.store.resolved_snapshot_path())?;
    let now = SystemClock.now();
    let tasks = store.tasks(Some(role.as_str()))?;
    let record = store.completion_record(now.date(), &role)?;
    let board = build_board(&role, &tasks, Some(&record), now);

    println!("{} on {}", board.role, board.date);
    for entry in &board.entries {
        let time = entry.task.time_label.as_deref().unwrap_or("--:--");
        println!("  [{:>8}] {time}  {}", entry.status.to_string(), entry.task.title);
    }
    let counts = board.counts();
    println!(
        "{}/{} done, {} late, {} due",
        counts.done, counts.total, counts.late, counts.due
    );
    tracing::info!(role = %board.role, tasks = counts.total, "board printed");
    Ok(())
}
