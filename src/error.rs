//! # Error Handling
//!
//! This module defines the centralized error type for `template-sync`. It uses
//! the `thiserror` library to describe every failure mode the library can
//! report, with enough context to tell the user which input was at fault.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum of possible errors. The reconcilers are pure
//!   and only fail through [`Error::Serialization`], when an option value
//!   cannot be reduced to its canonical identity. Every other variant belongs
//!   to the I/O boundary (snapshot files and the settings file).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A reconciliation error should be read as a data-integrity defect in one of
//! the input snapshots rather than a merge failure. Nothing in this crate
//! retries; retry policy belongs to whoever fetched the snapshots.

use thiserror::Error;

/// Main error type for template-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.template-sync.yaml` settings file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A snapshot document could not be read, decoded, or written.
    #[error("Snapshot error for {path}: {message}")]
    Snapshot { path: String, message: String },

    /// A value could not be serialized into its canonical form.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
