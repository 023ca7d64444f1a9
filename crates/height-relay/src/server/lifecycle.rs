use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use eyre::WrapErr;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use height_relay_core::store::HeightStore;

use super::{build_router, AppState};

// ==============================================================================
// Server Lifecycle
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub public_dir: PathBuf,
}

/// A bound, serving HTTP server. Obtained from [`start`] and consumed by
/// [`RunningServer::shutdown`].
pub struct RunningServer {
    local_addr: SocketAddr,
    store: Arc<dyn HeightStore>,
    shutdown_tx: oneshot::Sender<()>,
    serve_task: JoinHandle<std::io::Result<()>>,
    state: watch::Sender<ServerState>,
}

/// Bind the listener and start serving. The store must already be open; it
/// is closed again if the listener cannot be bound.
pub async fn start(config: &ServerConfig, app: AppState) -> eyre::Result<RunningServer> {
    let (state, _) = watch::channel(ServerState::Starting);
    let store = Arc::clone(&app.store);
    let bind_addr = format!("{}:{}", config.bind, config.port);
    tracing::debug!(%bind_addr, "starting HTTP server");

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            if let Err(close_err) = store.close().await {
                tracing::warn!(error = %close_err, "failed to close store after bind failure");
            }
            state.send_replace(ServerState::Stopped);
            return Err(err).wrap_err_with(|| format!("bind TCP listener on {bind_addr}"));
        }
    };
    let local_addr = listener.local_addr().wrap_err("read bound listener address")?;

    let router = build_router(app, &config.public_dir);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let serve_task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    state.send_replace(ServerState::Running);
    tracing::info!(%local_addr, "listening");

    Ok(RunningServer {
        local_addr,
        store,
        shutdown_tx,
        serve_task,
        state,
    })
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Observe state transitions, including the final `Stopped` after
    /// `shutdown` has consumed the server.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Close the store, then stop accepting connections and wait for
    /// in-flight requests to finish.
    pub async fn shutdown(self) -> eyre::Result<()> {
        self.state.send_replace(ServerState::Stopping);
        tracing::info!("closing store");
        let store_closed = self.store.close().await.wrap_err("close height store");

        tracing::info!("closing server");
        let _ = self.shutdown_tx.send(());
        let served = match self.serve_task.await {
            Ok(result) => result.wrap_err("run HTTP server"),
            Err(join_err) => Err(join_err).wrap_err("join HTTP server task"),
        };

        self.state.send_replace(ServerState::Stopped);
        store_closed?;
        served
    }
}
