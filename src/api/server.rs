//! Form server lifecycle: starts/stops the axum HTTP server that serves
//! the page and its JSON API.
//!
//! bind → spawn background task → return handle with shutdown channel.
//! The server task also runs the idle-session sweeper and stops it on
//! shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::api::router::build_router;
use crate::api::types::ApiContext;
use crate::assessment_client::RiskBackend;
use crate::session::{SessionStore, SESSION_IDLE_TIMEOUT};

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Metadata for a running form server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running form server.
pub struct FormServer {
    pub info: ServerInfo,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl FormServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Form server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish after `shutdown`.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Form server task failed: {e}");
            }
        }
    }
}

/// Bind `addr`, mount the form router and serve it in a background task.
///
/// Port 0 picks an ephemeral port; the bound address is in `info`.
pub async fn start_form_server(
    addr: SocketAddr,
    backend: Arc<dyn RiskBackend>,
) -> Result<FormServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let ctx = ApiContext::new(backend);
    let sessions = Arc::clone(&ctx.sessions);
    let app = build_router(ctx);

    let info = ServerInfo {
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Form server received shutdown signal");
        };

        tracing::info!(%addr, "Form server started");
        let sweeper = spawn_idle_sweeper(sessions, SWEEP_INTERVAL, SESSION_IDLE_TIMEOUT);

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Form server error: {e}");
        }

        sweeper.abort();
        tracing::info!("Form server stopped");
    });

    Ok(FormServer {
        info,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

/// Periodically drop sessions idle for `max_idle`.
pub(crate) fn spawn_idle_sweeper(
    sessions: Arc<SessionStore>,
    every: Duration,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = sessions.evict_idle(max_idle) {
                tracing::warn!("Idle session sweep failed: {e}");
            }
        }
    })
}
