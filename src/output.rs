//! # Output Configuration
//!
//! This module controls how the CLI presents results: whether colors and
//! emojis are used, and how a sync changelog and template listings are laid
//! out.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::fmt::Write as _;

use console::style;

use crate::keys::SystemIds;
use crate::model::Template;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` forces colors on,
    /// `never` forces them off, anything else detects from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // Presence alone disables colors, even if empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render the changelog of a sync pass.
pub fn render_changelog(config: &OutputConfig, notes: &[String]) -> String {
    let mut out = String::new();
    if notes.is_empty() {
        let _ = writeln!(
            out,
            "{} No changes: local content already matches the system.",
            emoji(config, "✅", "[OK]")
        );
        return out;
    }

    let header = format!("{} change(s) from the system update:", notes.len());
    let _ = writeln!(
        out,
        "{} {}",
        emoji(config, "📝", "[CHANGES]"),
        if config.use_color {
            style(header).bold().to_string()
        } else {
            header
        }
    );
    for note in notes {
        let _ = writeln!(out, "  - {}", note);
    }
    out
}

/// Render one line per template: id, localized name, and a marker for
/// templates that look like backups of a system id in `system_ids`.
pub fn render_template_list(
    config: &OutputConfig,
    templates: &[Template],
    system_ids: &[&str],
    locale: &str,
) -> String {
    let system_ids = SystemIds::new(system_ids.iter().copied());
    let mut out = String::new();
    for template in templates {
        let name = template
            .name
            .as_ref()
            .map_or("", |name| name.localize(locale));
        match system_ids.backup_origin(&template.id) {
            Some(origin) => {
                let marker = format!("(backup of {})", origin);
                let marker = if config.use_color {
                    style(marker).yellow().to_string()
                } else {
                    marker
                };
                let _ = writeln!(out, "{}  {}  {}", template.id, name, marker);
            }
            None => {
                let _ = writeln!(out, "{}  {}", template.id, name);
            }
        }
    }
    out
}
