//! Error types for the panel client
//!
//! This module defines the error types used throughout the library,
//! using `thiserror` for ergonomic error handling.
//!
//! Transport and HTTP failures are *not* surfaced through these types:
//! the transport layer normalizes them into the uniform response envelope
//! (see [`crate::api::envelope`]) so that feature code only ever sees one
//! result shape, and local form validation flows through field-level
//! messages rather than errors. The variants here cover what actually
//! propagates as `Err`: configuration loading and the challenge host's
//! script and widget failures.

use thiserror::Error;

/// Main error type for panel client operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// Missing or invalid client configuration (base address, site key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The challenge provider script failed to load
    #[error("Challenge script failed to load: {0}")]
    ScriptLoad(String),

    /// The challenge widget failed to render or verify
    #[error("Challenge widget error: {0}")]
    Widget(String),

    /// IO errors while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for panel client operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
