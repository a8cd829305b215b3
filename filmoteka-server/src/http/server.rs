//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS only when asked for
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, bounded by a grace period

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{ActorStore, FilmStore, MemoryCatalog, PgActorRepo, PgFilmRepo, Sessions};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = no CORS headers)
    pub cors_permissive: bool,

    /// How long in-flight requests may run after shutdown begins
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: false,
            shutdown_grace: Duration::from_secs(10),
        }
    }
}

/// Shared application state: one store per resource.
#[derive(Clone)]
pub struct AppState {
    pub actors: Arc<dyn ActorStore>,
    pub films: Arc<dyn FilmStore>,
}

impl AppState {
    /// Stores backed by the writer/reader sessions.
    pub fn postgres(sessions: &Sessions) -> Self {
        Self {
            actors: Arc::new(PgActorRepo::new(sessions)),
            films: Arc::new(PgFilmRepo::new(sessions)),
        }
    }

    /// Both resources served from one in-memory catalog.
    pub fn in_memory(catalog: Arc<MemoryCatalog>) -> Self {
        Self {
            actors: catalog.clone(),
            films: catalog,
        }
    }
}

/// Build the application router.
///
/// All matching happens in the route table; axum only sees a fallback.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .fallback(routes::dispatch)
        .layer(TraceLayer::new_for_http());

    let app = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    app.with_state(state)
}

/// Run the HTTP server until `shutdown` resolves.
///
/// After the signal the listener stops accepting and in-flight requests get
/// `config.shutdown_grace` to finish. Every connection runs in a task owned
/// here, so whatever is still running after the grace period is aborted
/// before this returns.
///
/// # Example
///
/// ```ignore
/// let sessions = Sessions::connect(&session_config).await?;
/// let listener = TcpListener::bind(config.bind_addr).await?;
/// run_server(listener, AppState::postgres(&sessions), config, shutdown_signal()).await?;
/// sessions.close().await;
/// ```
pub async fn run_server<F>(
    listener: TcpListener,
    state: AppState,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state, &config);
    let grace = config.shutdown_grace;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    let (draining_tx, draining_rx) = watch::channel(false);
    let mut connections = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to accept connection");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        continue;
                    }
                };
                let service = TowerToHyperService::new(app.clone());
                connections.spawn(serve_connection(stream, peer, service, draining_rx.clone()));
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    drop(listener);
    tracing::info!(?grace, "shutdown requested, draining connections");
    let _ = draining_tx.send(true);

    if tokio::time::timeout(grace, drain(&mut connections)).await.is_err() {
        tracing::warn!(
            remaining = connections.len(),
            "grace period elapsed, aborting remaining requests"
        );
        connections.abort_all();
        drain(&mut connections).await;
        return Err(ServerError::GraceExpired(grace));
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Serve one connection, finishing the current request and closing once
/// draining starts.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: TowerToHyperService<Router>,
    mut draining: watch::Receiver<bool>,
) {
    let builder = ConnectionBuilder::new(TokioExecutor::new());
    let conn = builder.serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let finished = tokio::select! {
        result = conn.as_mut() => Some(result),
        _ = draining.wait_for(|draining| *draining) => None,
    };
    let result = match finished {
        Some(result) => result,
        None => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };

    if let Err(e) = result {
        tracing::debug!(%peer, error = %e, "connection closed with error");
    }
}

async fn drain(connections: &mut JoinSet<()>) {
    while connections.join_next().await.is_some() {}
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("in-flight requests still running after {0:?} grace period")]
    GraceExpired(Duration),
}
