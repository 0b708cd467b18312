//! # Snapshot Documents
//!
//! A snapshot is everything a client holds about templates and banks at one
//! point in time. Two kinds exist:
//!
//! - [`SystemSnapshot`]: the canonical content published by the server, with
//!   the data version it was published under.
//! - [`LocalSnapshot`]: the client's working copy, with the system data
//!   version it was last reconciled against.
//!
//! Snapshots are read from and written to JSON or YAML files. The format is
//! picked from the file extension: `.yaml` and `.yml` are YAML, anything else
//! is JSON. Written JSON is pretty-printed with a trailing newline.

use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{BankMap, DefaultMap, Template};

/// Canonical content as published by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    /// Version of the canonical data set.
    pub data_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub banks: BankMap,
    #[serde(default)]
    pub defaults: DefaultMap,
}

/// The client's local, possibly edited, copy of the content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSnapshot {
    /// System data version this snapshot was last reconciled against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub banks: BankMap,
    #[serde(default)]
    pub defaults: DefaultMap,
}

/// On-disk encoding of a snapshot file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Load a system snapshot from `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or `Error::Snapshot` if
/// it does not decode.
pub fn load_system(path: &Path) -> Result<SystemSnapshot> {
    load(path)
}

/// Load a local snapshot from `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or `Error::Snapshot` if
/// it does not decode.
pub fn load_local(path: &Path) -> Result<LocalSnapshot> {
    load(path)
}

/// Write a local snapshot to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `Error::Snapshot` if the snapshot cannot be encoded, or
/// `Error::Io` if the file cannot be written.
pub fn save_local(path: &Path, snapshot: &LocalSnapshot) -> Result<()> {
    let content = encode(snapshot, Format::from_path(path)).map_err(|err| Error::Snapshot {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    fs::write(path, content)?;
    debug!("wrote local snapshot to {}", path.display());
    Ok(())
}

/// Decode a snapshot from text in the given format.
///
/// # Errors
///
/// Returns `Error::Json` or `Error::Yaml` if the text does not decode.
pub fn decode<T: DeserializeOwned>(content: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Encode a snapshot as text in the given format.
///
/// # Errors
///
/// Returns `Error::Json` or `Error::Yaml` if the value cannot be encoded.
pub fn encode<T: Serialize>(snapshot: &T, format: Format) -> Result<String> {
    let content = match format {
        Format::Json => serde_json::to_string_pretty(snapshot)?,
        Format::Yaml => serde_yaml::to_string(snapshot)?,
    };
    Ok(ensure_trailing_newline(content))
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    decode(&content, Format::from_path(path)).map_err(|err| Error::Snapshot {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}
