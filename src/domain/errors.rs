//! Domain error types
//!
//! This module defines the error hierarchy for roster-notify.
//! Errors never expose third-party types; adapters convert them at the boundary.

use std::time::Duration;
use thiserror::Error;

/// Main roster-notify error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Configuration-related errors (fatal, exit 1)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Building code rejected at the boundary
    #[error(transparent)]
    BuildingCode(#[from] BuildingCodeError),

    /// Record file errors (reading or writing CSV)
    #[error("Record file error: {0}")]
    RecordFile(String),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(String),

    /// Message composition errors
    #[error("Message composition error: {0}")]
    Compose(String),

    /// Message transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Credential reset tool errors
    #[error("Reset tool error: {0}")]
    ResetTool(#[from] ResetToolError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised when parsing a building code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildingCodeError {
    /// The code was empty
    #[error("building code cannot be empty")]
    Empty,

    /// The code contains something other than ASCII letters
    #[error("building code '{0}' must contain letters only")]
    NotAlphabetic(String),

    /// The code is well-formed but not one of the known buildings
    #[error("unknown building code '{code}'. Expected one of: {expected}")]
    Unknown { code: String, expected: String },
}

/// Message transport errors
///
/// Raised by `MessageTransport` implementations. The notifier converts these into
/// a failed outcome; they never escape a notification call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not obtain an access token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network-level failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status
    #[error("Message rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The provider answer could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Credential reset tool errors
#[derive(Debug, Error)]
pub enum ResetToolError {
    /// The tool could not be started
    #[error("failed to start '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// The tool did not finish within the configured bound
    #[error("reset tool did not finish within {timeout:?} and was killed")]
    Timeout { timeout: Duration },

    /// The tool wrote something that is not UTF-8
    #[error("reset tool output is not valid UTF-8: {0}")]
    InvalidOutput(String),
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::Io(err.to_string())
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        RosterError::RecordFile(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        RosterError::Configuration(format!("TOML parse error: {err}"))
    }
}
