//! nimbus-bot
//!
//! Processes access requests filed as issues in the Nimbus getting-started
//! repository.

use clap::Parser;
use tracing::{info, warn};

use nimbus_config::{Config, ConfigLoader, ConfigValidator, ValidationWarning};

mod cli;
mod server;

use cli::{Cli, Commands};
use server::{BoxError, RunOptions};

/// Load, overlay and validate the configuration.
fn load_config(cli: &Cli) -> Result<(Config, Vec<ValidationWarning>), BoxError> {
    let config = ConfigLoader::load_layered(cli.config.as_deref())?;
    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    Ok((config, warnings))
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let (config, warnings) = load_config(&cli)?;

    match cli.command.unwrap_or_default() {
        Commands::CheckConfig => {
            for warning in &warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            println!(
                "Configuration OK: organization {}, repository {}, webhook {}",
                config.github.organization,
                config.github.repository_full_name(),
                config.webhook.callback_url()
            );
        }
        Commands::Reconcile => {
            server::init_tracing(&config.logging)?;
            log_warnings(&warnings);
            let report = server::run_reconcile(config).await?;
            println!(
                "scanned={} acknowledged={} denied={} failed={}",
                report.scanned, report.acknowledged, report.denied, report.failed
            );
        }
        Commands::Run {
            host,
            port,
            skip_register,
            skip_reconcile,
        } => {
            server::init_tracing(&config.logging)?;
            log_warnings(&warnings);
            info!(
                "Starting nimbus-bot {} for {}",
                env!("CARGO_PKG_VERSION"),
                config.github.repository_full_name()
            );
            let options = RunOptions {
                host,
                port,
                skip_register,
                skip_reconcile,
            };
            server::run_server(config, options).await?;
        }
    }

    Ok(())
}

fn log_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
}
