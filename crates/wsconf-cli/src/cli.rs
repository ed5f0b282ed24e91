//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wsconf - Resolve workspace connections and configuration variables
#[derive(Parser, Debug)]
#[command(name = "wsconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interpolate variables and secrets
    ///
    /// Reads two JSON objects of string values and prints the resolved
    /// variables, secrets, secret references and their digests.
    ///
    /// Examples:
    ///   wsconf interpolate --env env.json --secrets secrets.json
    ///   wsconf interpolate --env env.json --show-secrets
    Interpolate {
        /// JSON file of plain variables
        #[arg(long)]
        env: Option<PathBuf>,

        /// JSON file of secret variables
        #[arg(long)]
        secrets: Option<PathBuf>,

        /// Print secret values instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },

    /// Infer which variable keys will be secret
    SecretKeys {
        /// JSON file of plain variables
        #[arg(long)]
        env: Option<PathBuf>,

        /// A key known to be secret (repeatable)
        #[arg(long = "secret-key")]
        secret_keys: Vec<String>,
    },

    /// Resolve a connection against a snapshot store
    ///
    /// Examples:
    ///   wsconf resolve cluster --store store.json --contract cluster/aws/ecs
    ///   wsconf resolve network --store store.json --via cluster --optional
    Resolve {
        /// Connection name
        name: String,

        /// Snapshot store JSON file
        #[arg(long)]
        store: PathBuf,

        /// Plan file (defaults to .wsconf.json in the current directory)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Active-workspace YAML manifest with connection overrides
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Contract the connection must satisfy
        #[arg(long)]
        contract: Option<String>,

        /// Legacy connection type
        #[arg(long = "type")]
        connection_type: Option<String>,

        /// Connections to traverse first, separated by '/'
        #[arg(long)]
        via: Option<String>,

        /// Do not fail when the connection is missing
        #[arg(long)]
        optional: bool,
    },

    /// Show the plan's workspace identity
    Workspace {
        /// Plan file (defaults to .wsconf.json in the current directory)
        #[arg(long)]
        plan: Option<PathBuf>,
    },
}
