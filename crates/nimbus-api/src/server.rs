//! Interface server implementation.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::InterfaceError;
use crate::http::routes::create_router;
use crate::state::AppState;

/// Interface server configuration.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub host: String,
    pub port: u16,
    /// Route path of the webhook endpoint, e.g. `/payload`.
    pub callback_path: String,
}

impl InterfaceConfig {
    pub fn new(host: impl Into<String>, port: u16, callback_path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            callback_path: callback_path.into(),
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            callback_path: "/payload".to_string(),
        }
    }
}

/// The interface server.
pub struct InterfaceServer {
    config: InterfaceConfig,
    state: Arc<AppState>,
}

impl InterfaceServer {
    pub fn new(config: InterfaceConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(&self) -> Result<(), InterfaceError> {
        let app = create_router(self.state.clone(), &self.config.callback_path);

        let addr = self.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| InterfaceError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!(
            "Listening on {} (webhook at {})",
            addr, self.config.callback_path
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(InterfaceError::Serve)?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
