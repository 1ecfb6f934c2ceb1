//! Where dutyboard keeps its files.
//!
//! ```text
//! <config_dir>/config.toml        DutyConfig
//! <data_dir>/checklist.json       SnapshotStore (tasks, users, completion rows)
//! <data_dir>/photos/<user>/       prepared JPEG uploads
//! ```
//!
//! `<config_dir>` and `<data_dir>` are the platform directories from [`dirs`]
//! with a `dutyboard` suffix. `DUTYBOARD_CONFIG_DIR` and `DUTYBOARD_DATA_DIR`
//! replace them outright, which is how the integration tests point the crate
//! at a temp directory. Without a home directory both fall back to the
//! system temp dir.

use std::path::PathBuf;

const APP_DIR: &str = "dutyboard";

fn resolve(env_var: &str, platform: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = std::env::var_os(env_var) {
        return PathBuf::from(dir);
    }
    platform
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Root for the checklist snapshot and stored photos.
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve("DUTYBOARD_DATA_DIR", dirs::data_dir())
}

/// Holds `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    resolve("DUTYBOARD_CONFIG_DIR", dirs::config_dir())
}

#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default snapshot used when `store.snapshot_path` is unset.
#[must_use]
pub fn store_file() -> PathBuf {
    data_dir().join("checklist.json")
}

/// Default target for [`crate::photo::PreparedPhoto::store_in`].
#[must_use]
pub fn photos_dir() -> PathBuf {
    data_dir().join("photos")
}
