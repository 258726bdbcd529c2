//! Unified application error type.
//! All modules (core, cli, config, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Log rewrite failed, file left unchanged: {0}")]
    CorruptRewrite(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid log line: {0}")]
    InvalidLogLine(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid location sample: {0}")]
    InvalidLocation(String),

    // ---------------------------
    // Session errors
    // ---------------------------
    #[error("No logging session is active")]
    SessionNotActive,

    #[error("A logging session is already active")]
    SessionAlreadyActive,

    #[error("Location services are disabled")]
    LocationServicesDisabled,

    #[error("Remote handler failed: {0}")]
    Handler(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
