use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Configuration tooling for the fncall agent kit
#[derive(Debug, Parser)]
#[command(name = "fncall", about = "Inspect and validate fncall agent configuration")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml", env = "FNCALL_CONFIG", global = true)]
    pub config: PathBuf,

    /// Log filter directive (e.g. `debug`, `fncall_config=trace`)
    #[arg(long, default_value = "info", env = "FNCALL_LOG", global = true)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report every validation finding; exits non-zero on errors
    Check,
    /// Print the loaded configuration as JSON
    Show {
        /// Print the effective LLM settings of one tool instead
        #[arg(long)]
        tool: Option<String>,
    },
    /// Print the tool selector table
    Tools,
    /// Load an evaluation dataset and print it as JSON
    Dataset {
        /// Dataset file (.json, .csv or .txt)
        path: PathBuf,
        /// Dataset name, defaults to the file stem
        #[arg(long)]
        name: Option<String>,
    },
}
