//! Startup sequence and server runner.

use std::error::Error;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use nimbus_api::{AppState, InterfaceConfig, InterfaceServer};
use nimbus_config::{Config, LoggingConfig};
use nimbus_github::{Credentials, GitHubClient};
use nimbus_protocols::{IssueTracker, RepoRef};
use nimbus_workflow::{
    AccessWorkflow, HookRegistration, Messages, OrgContext, ReconcileReport, register_webhook,
};

pub(crate) type BoxError = Box<dyn Error + Send + Sync>;

/// Options of the `run` command.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub skip_register: bool,
    pub skip_reconcile: bool,
}

/// Filter directive used when `RUST_LOG` is not set.
pub(crate) fn default_directive(logging: &LoggingConfig) -> &'static str {
    logging.filter_directive().unwrap_or("info")
}

/// Initialize tracing: console output, plus a daily rolling file when
/// `logging.directory` is set.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), BoxError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(logging))?,
    };

    let file_layer = match &logging.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("nimbus-bot")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Dropping the guard stops the writer thread.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// GitHub client for the configured account.
pub(crate) fn build_client(config: &Config) -> Result<GitHubClient, BoxError> {
    let credentials =
        Credentials::from_parts(config.github.username.clone(), config.github.password.clone());
    Ok(GitHubClient::with_url(credentials, &config.github.api_url)?)
}

/// Resolve the organization context and build the workflow.
pub(crate) async fn build_workflow(
    tracker: Arc<dyn IssueTracker>,
    config: &Config,
) -> Result<Arc<AccessWorkflow>, BoxError> {
    let repo = RepoRef::parse(&config.github.repository_full_name())?;
    let context = OrgContext::resolve(tracker.as_ref(), &config.github.organization, repo).await?;
    let messages = Messages::new(
        &config.github.organization,
        &config.github.admin_team,
        &config.workflow.hub_url,
    );
    Ok(Arc::new(AccessWorkflow::new(tracker, context, messages)))
}

/// Register the organization webhook. Failures are logged, never returned.
pub(crate) async fn ensure_webhook(tracker: &dyn IssueTracker, config: &Config) {
    let url = config.webhook.callback_url();
    match register_webhook(tracker, &config.github.organization, &url).await {
        Ok(HookRegistration::Created { id }) => info!("Registered webhook {} for {}", id, url),
        Ok(HookRegistration::AlreadyRegistered { id }) => {
            info!("Webhook {} already registered for {}", id, url)
        }
        Err(e) => error!("Failed to register webhook for {}: {}", url, e),
    }
}

pub(crate) async fn reconcile(workflow: &AccessWorkflow) -> Result<ReconcileReport, BoxError> {
    let report = workflow.reconcile().await?;
    if report.failed > 0 {
        warn!("{} requests could not be reconciled", report.failed);
    }
    Ok(report)
}

/// Full startup: connect, register, reconcile, serve.
pub(crate) async fn run_server(config: Config, options: RunOptions) -> Result<(), BoxError> {
    let tracker: Arc<dyn IssueTracker> = Arc::new(build_client(&config)?);
    let workflow = build_workflow(tracker.clone(), &config).await?;

    if options.skip_register {
        info!("Skipping webhook registration");
    } else {
        ensure_webhook(tracker.as_ref(), &config).await;
    }

    if options.skip_reconcile {
        info!("Skipping reconciliation");
    } else {
        reconcile(&workflow).await?;
    }

    let interface_config = InterfaceConfig::new(
        options.host.unwrap_or(config.server.host),
        options.port.unwrap_or(config.server.port),
        config.webhook.route_path(),
    );
    let state = Arc::new(AppState::new(workflow));
    InterfaceServer::new(interface_config, state).run().await?;
    Ok(())
}

/// Connect and reconcile once.
pub(crate) async fn run_reconcile(config: Config) -> Result<ReconcileReport, BoxError> {
    let tracker: Arc<dyn IssueTracker> = Arc::new(build_client(&config)?);
    let workflow = build_workflow(tracker, &config).await?;
    reconcile(&workflow).await
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
