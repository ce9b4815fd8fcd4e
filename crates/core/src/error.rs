//! Error types for the Agendabot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use std::path::PathBuf;
use thiserror::Error;

/// A due date that could not be read as `dd/mm/yyyy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected dd/mm/yyyy, got `{0}`")]
    Format(String),

    #[error("`{field}` is not a number in `{input}`")]
    NotANumber { input: String, field: String },

    #[error("`{0}` is not a calendar date")]
    OutOfRange(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read agenda at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse agenda at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write agenda at {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Assignment not found: {description} in {subject}")]
    AssignmentNotFound { subject: String, description: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing required option `{option}` for /{command}")]
    MissingOption { command: String, option: String },
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    #[error("Command registration failed (status {status}): {reason}")]
    RegistrationFailed { status: u16, reason: String },

    #[error("Invalid request signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(String),

    #[error("Network error: {0}")]
    Network(String),
}
