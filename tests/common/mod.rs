//! Shared test utilities for integration and E2E tests.
//!
//! This module provides snapshot fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_local(snapshots::LOCAL_EDITED)
//!         .with_system(snapshots::SYSTEM_V2);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::snapshots;
    pub use super::TestFixture;
}

/// Snapshot documents for testing.
#[allow(dead_code)]
pub mod snapshots {
    /// System snapshot at version 2.0.0.
    pub const SYSTEM_V2: &str = r#"{
  "dataVersion": "2.0.0",
  "updatedAt": "2024-06-01T08:00:00Z",
  "templates": [
    {"id": "poster", "name": {"cn": "海报", "en": "Poster"}, "content": "A poster of {subject}, v2"},
    {"id": "portrait", "name": "Portrait", "content": "A portrait of {subject}"}
  ],
  "banks": {
    "colors": {"label": {"cn": "颜色", "en": "Colors"}, "category": "visual", "options": ["red", "blue"]}
  },
  "defaults": {"colors": "red"}
}
"#;

    /// Local snapshot synced at 1.0.0 with one edited system template, a
    /// custom template, a custom option and a custom bank.
    pub const LOCAL_EDITED: &str = r#"{
  "dataVersion": "1.0.0",
  "templates": [
    {"id": "poster", "name": {"cn": "我的海报", "en": "My poster"}, "content": "A poster of {subject}", "selections": {"subject": "cat"}},
    {"id": "mine", "name": "Mine", "content": "Something of my own"}
  ],
  "banks": {
    "colors": {"label": "Colors", "category": "visual", "options": ["red", "blue", "green"]},
    "moods": {"label": "Moods", "category": "feeling", "options": ["calm"]}
  },
  "defaults": {"colors": "green", "moods": "calm"}
}
"#;

    /// Local snapshot that is already in sync with [`SYSTEM_V2`].
    pub const LOCAL_CURRENT: &str = r#"{
  "dataVersion": "2.0.0",
  "templates": [
    {"id": "poster", "name": {"cn": "海报", "en": "Poster"}, "content": "A poster of {subject}, v2"},
    {"id": "portrait", "name": "Portrait", "content": "A portrait of {subject}"}
  ],
  "banks": {
    "colors": {"label": {"cn": "颜色", "en": "Colors"}, "category": "visual", "options": ["red", "blue"]}
  },
  "defaults": {"colors": "red"}
}
"#;

    /// Local snapshot at 2.0.0 whose `poster` was edited after the last sync.
    pub const LOCAL_CURRENT_EDITED: &str = r#"{
  "dataVersion": "2.0.0",
  "templates": [
    {"id": "poster", "name": {"cn": "海报", "en": "Poster"}, "content": "A poster of {subject}, my way"},
    {"id": "portrait", "name": "Portrait", "content": "A portrait of {subject}"}
  ],
  "banks": {
    "colors": {"label": {"cn": "颜色", "en": "Colors"}, "category": "visual", "options": ["red", "blue"]}
  },
  "defaults": {"colors": "red"}
}
"#;

    /// Settings file with a custom backup suffix.
    pub const SETTINGS_OLD_SUFFIX: &str = "backup_suffix: \" (old)\"\nlocale: en\n";

    /// Invalid JSON for error testing.
    pub const INVALID_JSON: &str = "{ \"dataVersion\": ";
}

/// A test fixture that provides a temporary directory with snapshot files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `local.json` with the given content.
    pub fn with_local(self, content: &str) -> Self {
        self.with_file("local.json", content)
    }

    /// Write `system.json` with the given content.
    pub fn with_system(self, content: &str) -> Self {
        self.with_file("system.json", content)
    }

    /// Write `.template-sync.yaml` with the given content.
    pub fn with_settings(self, content: &str) -> Self {
        self.with_file(".template-sync.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn local_path(&self) -> PathBuf {
        self.path().join("local.json")
    }

    pub fn system_path(&self) -> PathBuf {
        self.path().join("system.json")
    }

    /// Read and parse a JSON file from the fixture directory.
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.path().join(path)).expect("Failed to read file");
        serde_json::from_str(&content).expect("File should be valid JSON")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("template-sync");
        cmd.current_dir(self.path())
            .env_remove("TEMPLATE_SYNC_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Create a command for `subcommand` with `--local` and `--system` set.
    pub fn command_with_snapshots(&self, subcommand: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg(subcommand)
            .arg("--local")
            .arg(self.local_path())
            .arg("--system")
            .arg(self.system_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
