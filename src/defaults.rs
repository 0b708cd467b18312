//! Default values for template-sync.
//!
//! This module provides centralized default values used across the library
//! and commands, ensuring consistency and avoiding duplication.

/// Suffix appended to the display name of a backup.
pub const DEFAULT_BACKUP_SUFFIX: &str = " (backup)";

/// Locale used when printing localized names.
pub const DEFAULT_LOCALE: &str = "cn";

/// File name of the optional settings file.
pub const CONFIG_FILE_NAME: &str = ".template-sync.yaml";
