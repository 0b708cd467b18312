//! # Settings File
//!
//! Optional `.template-sync.yaml` settings. Every key is optional:
//!
//! ```yaml
//! backup_suffix: " (old)"
//! locale: en
//! ```
//!
//! Values resolve in this order: command-line flag, settings file, built-in
//! default from [`crate::defaults`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{CONFIG_FILE_NAME, DEFAULT_BACKUP_SUFFIX, DEFAULT_LOCALE};
use crate::error::{Error, Result};
use crate::sync::SyncOptions;

/// Contents of a settings file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Suffix appended to the display name of backups.
    #[serde(default)]
    pub backup_suffix: Option<String>,
    /// Locale used when printing localized names.
    #[serde(default)]
    pub locale: Option<String>,
}

impl Settings {
    /// Backup suffix, with `flag` taking precedence over the file.
    pub fn backup_suffix(&self, flag: Option<&str>) -> String {
        flag.or(self.backup_suffix.as_deref())
            .unwrap_or(DEFAULT_BACKUP_SUFFIX)
            .to_string()
    }

    /// Display locale, with `flag` taking precedence over the file.
    pub fn locale(&self, flag: Option<&str>) -> String {
        flag.or(self.locale.as_deref())
            .unwrap_or(DEFAULT_LOCALE)
            .to_string()
    }

    /// Sync options resolved against an optional command-line suffix.
    pub fn sync_options(&self, backup_suffix_flag: Option<&str>) -> SyncOptions {
        SyncOptions {
            backup_suffix: self.backup_suffix(backup_suffix_flag),
        }
    }
}

/// Parse settings from YAML text.
///
/// An empty document yields default settings.
///
/// # Errors
///
/// Returns `Error::ConfigParse` for malformed YAML or unknown keys.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|err| Error::ConfigParse {
        message: err.to_string(),
        hint: Some("Valid keys are backup_suffix and locale".to_string()),
    })
}

/// Read and parse a settings file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or `Error::ConfigParse`
/// if it does not parse.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load settings from an explicit path, or from `.template-sync.yaml` in
/// `working_dir` if that exists, or fall back to defaults.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
///
/// # Errors
///
/// Returns the errors of [`from_file`].
pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings> {
    match explicit {
        Some(path) => from_file(path),
        None => {
            let candidate: PathBuf = working_dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                from_file(candidate)
            } else {
                Ok(Settings::default())
            }
        }
    }
}
