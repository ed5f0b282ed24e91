//! wsconf CLI
//!
//! Offline front-end for connection resolution and variable interpolation.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use wsconf_model::ConnectionDeclaration;

use cli::{Cli, Commands};
use commands::resolve::ResolveArgs;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} workspace configuration resolver", "wsconf".green().bold());
            println!();
            println!("Run {} for available commands.", "wsconf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Interpolate {
            env,
            secrets,
            show_secrets,
        } => commands::run_interpolate(env.as_deref(), secrets.as_deref(), show_secrets),
        Commands::SecretKeys { env, secret_keys } => {
            commands::run_secret_keys(env.as_deref(), &secret_keys)
        }
        Commands::Resolve {
            name,
            store,
            plan,
            overrides,
            contract,
            connection_type,
            via,
            optional,
        } => {
            let declaration = ConnectionDeclaration {
                name,
                contract,
                connection_type,
                optional,
                via,
            };
            commands::run_resolve(ResolveArgs {
                declaration,
                store: &store,
                plan: plan.as_deref(),
                overrides: overrides.as_deref(),
            })
        }
        Commands::Workspace { plan } => commands::run_workspace(plan.as_deref()),
    }
}
