//! Connection resolution command

use std::path::Path;

use colored::Colorize;
use wsconf_connect::{ConnectionReader, ResolveContext, Severity, SnapshotStore};
use wsconf_model::ConnectionDeclaration;

use crate::context::load_plan;
use crate::error::{CliError, Result};

/// What to resolve and where to look.
pub struct ResolveArgs<'a> {
    pub declaration: ConnectionDeclaration,
    pub store: &'a Path,
    pub plan: Option<&'a Path>,
    pub overrides: Option<&'a Path>,
}

/// Run the resolve command
///
/// Prints the readout as JSON and its diagnostics to stderr. Fails when any
/// diagnostic is an error.
pub fn run_resolve(args: ResolveArgs<'_>) -> Result<()> {
    let plan = load_plan(args.plan, args.overrides)?;
    let store = SnapshotStore::load(args.store)?;
    let context = ResolveContext::from_plan(&plan);

    let readout = ConnectionReader::new(&store).read(&context, &args.declaration);

    for diagnostic in &readout.diagnostics {
        let label = match diagnostic.severity {
            Severity::Error => "error:".red().bold(),
            Severity::Warning => "warning:".yellow().bold(),
        };
        eprintln!("{} {}", label, diagnostic.summary);
        if let Some(detail) = &diagnostic.detail {
            eprintln!("  {}", detail.dimmed());
        }
    }

    println!("{}", serde_json::to_string_pretty(&readout)?);

    if readout.has_errors() {
        return Err(CliError::user(format!(
            "connection '{}' could not be resolved",
            readout.name
        )));
    }
    Ok(())
}
