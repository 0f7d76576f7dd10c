//! CLI definitions for nimbus-bot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nimbus-bot CLI.
#[derive(Parser)]
#[command(name = "nimbus-bot")]
#[command(about = "GitHub bot that processes Nimbus access requests")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path. Without one, configuration comes from the environment.
    #[arg(short, long, env = "NIMBUS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Register the webhook, reconcile open requests and serve (default)
    Run {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,

        /// Do not register the organization webhook
        #[arg(long)]
        skip_register: bool,

        /// Do not reconcile open requests before serving
        #[arg(long)]
        skip_reconcile: bool,
    },

    /// Reconcile open requests once and exit
    Reconcile,

    /// Validate the configuration and exit
    CheckConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run {
            host: None,
            port: None,
            skip_register: false,
            skip_reconcile: false,
        }
    }
}
