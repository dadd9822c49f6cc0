//! Unified application error type.
//! All modules (db, core, sync, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Backup error: {0}")]
    Backup(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("A reason is required when access is denied")]
    MissingReason,

    #[error("A reason can only be given for denied access")]
    UnexpectedReason,

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid access result: {0} (expected 'allowed' or 'denied')")]
    InvalidResult(String),

    // ---------------------------
    // Remote archive
    // ---------------------------
    #[error("Server sync is disabled in the configuration")]
    SyncDisabled,

    #[error("Server URL is not configured")]
    EndpointNotConfigured,

    #[error("{}", describe_remote(*status, message))]
    Remote {
        status: Option<u16>,
        message: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn describe_remote(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Server returned error {code}: {message}"),
        None => format!("Error connecting to server: {message}"),
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Remote {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
