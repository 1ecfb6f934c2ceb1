//! Error types for the dutyboard crate.
//!
//! The scheduling core never fails; these errors only surface from the
//! outer layers (configuration, the checklist store and photo preparation).

/// Top-level error type for the checklist tracker.
#[derive(Debug, thiserror::Error)]
pub enum DutyError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Checklist store error (snapshot read/write, unknown records).
    #[error("store error: {0}")]
    Store(String),

    /// Photo decode, resize or encode error.
    #[error("photo error: {0}")]
    Photo(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DutyError>;
