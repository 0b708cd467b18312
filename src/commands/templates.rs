//! Templates command implementation
//!
//! Lists the templates of a snapshot with their localized names. When a
//! system snapshot is given, templates that look like backups of a system
//! template are marked as such.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::Context;
use template_sync::output::render_template_list;
use template_sync::snapshot;
use template_sync::suggestions;

/// Arguments for the templates command
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// The local snapshot file to list
    #[arg(short, long, value_name = "FILE")]
    pub local: PathBuf,

    /// A system snapshot used to recognize backups
    #[arg(short, long, value_name = "FILE")]
    pub system: Option<PathBuf>,

    /// Locale for template names (for example cn or en)
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}

/// Execute the templates command
pub fn execute(args: TemplatesArgs, context: &Context) -> Result<()> {
    if !args.local.exists() {
        return Err(suggestions::snapshot_not_found("local", &args.local));
    }
    let local = snapshot::load_local(&args.local)?;

    let system = match &args.system {
        Some(path) if !path.exists() => {
            return Err(suggestions::snapshot_not_found("system", path));
        }
        Some(path) => Some(snapshot::load_system(path)?),
        None => None,
    };
    let system_ids: Vec<&str> = system
        .iter()
        .flat_map(|s| s.templates.iter().map(|t| t.id.as_str()))
        .collect();

    let locale = context.settings.locale(args.locale.as_deref());
    print!(
        "{}",
        render_template_list(&context.output, &local.templates, &system_ids, &locale)
    );
    Ok(())
}
