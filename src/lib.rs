pub mod analysis_guard;
pub mod api;
pub mod assessment_client;
pub mod config;
pub mod form;
pub mod models;
pub mod report;
pub mod session;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::assessment_client::{AssessmentClient, RiskBackend};
use crate::config::{BackendConfig, ConfigError, ServerConfig};

/// Reasons the form server can fail to come up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Runtime error: {0}")]
    Runtime(std::io::Error),
    #[error("Failed to start form server on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
}

/// Resolve configuration, start the form server and serve until Ctrl-C.
pub fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Both are fatal: the form is never served without a backend.
    let backend_config = BackendConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;
    tracing::info!(endpoint = backend_config.endpoint.as_str(), "Risk service configured");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    runtime.block_on(serve(backend_config, server_config))
}

async fn serve(
    backend_config: BackendConfig,
    server_config: ServerConfig,
) -> Result<(), StartupError> {
    let backend: Arc<dyn RiskBackend> = Arc::new(AssessmentClient::new(&backend_config));

    let mut server = api::start_form_server(server_config.bind, backend)
        .await
        .map_err(|source| StartupError::Bind {
            addr: server_config.bind,
            source,
        })?;

    tracing::info!("Form available at http://{}/", server.info.server_addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.stopped().await;
    Ok(())
}
