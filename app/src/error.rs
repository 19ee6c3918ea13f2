//! Application error handling
//!
//! Numeric form input never fails; these errors cover the orchestration
//! around it: naming a field that does not exist, selecting an option that
//! does not exist, and reading configuration or saved snapshots.

use body_metrics_shared::ParseError;
use thiserror::Error;

/// Errors raised by the form orchestration layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] ParseError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}

impl AppError {
    /// Stable code for collaborators that map errors to messages
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnknownField(_) => "UNKNOWN_FIELD",
            AppError::InvalidSelection(_) => "INVALID_SELECTION",
            AppError::Snapshot(_) => "SNAPSHOT_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Telemetry(_) => "TELEMETRY_ERROR",
        }
    }
}
