//! HTTP server command
//!
//! Opens the writer and reader database sessions, serves until SIGINT or
//! SIGTERM, then drains and closes both sessions.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use filmoteka_server::db::{Credentials, MemoryCatalog, SessionConfig, Sessions};
use filmoteka_server::{run_server, shutdown_signal, AppState, ServerConfig};

use crate::tracing_setup::{self, LogSink, TracingConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FILMOTEKA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database host
    #[arg(long, env = "FILMOTEKA_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "FILMOTEKA_DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "FILMOTEKA_DB_NAME", default_value = "filmoteka")]
    pub db_name: String,

    /// User for the read-write session
    #[arg(long, env = "FILMOTEKA_ADMIN_USER", default_value = "adm")]
    pub admin_user: String,

    /// Password for the read-write session
    #[arg(long, env = "FILMOTEKA_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// User for the read-only session
    #[arg(long, env = "FILMOTEKA_READER_USER", default_value = "u")]
    pub reader_user: String,

    /// Password for the read-only session
    #[arg(long, env = "FILMOTEKA_READER_PASSWORD", hide_env_values = true)]
    pub reader_password: Option<String>,

    /// Maximum connections per session
    #[arg(long, env = "FILMOTEKA_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for each session to connect
    #[arg(long, env = "FILMOTEKA_CONNECT_TIMEOUT", default_value_t = 5)]
    pub connect_timeout: u64,

    /// Seconds in-flight requests may run after shutdown starts
    #[arg(long, env = "FILMOTEKA_SHUTDOWN_GRACE", default_value_t = 10)]
    pub shutdown_grace: u64,

    /// Append logs to this file
    #[arg(long, env = "FILMOTEKA_LOG_FILE", default_value = "app.log")]
    pub log_file: PathBuf,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve from an in-memory store instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            admin: Credentials::new(&self.admin_user, self.admin_password.clone()),
            reader: Credentials::new(&self.reader_user, self.reader_password.clone()),
            max_connections: self.max_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            shutdown_grace: Duration::from_secs(self.shutdown_grace),
        }
    }

    fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            debug: self.debug,
            sink: if self.log_stderr {
                LogSink::Stderr
            } else {
                LogSink::File(self.log_file.clone())
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing_setup::init(&args.tracing_config()).context("Failed to initialize logging")?;

    let config = args.server_config();

    if args.in_memory {
        tracing::warn!("serving from the in-memory store; data is lost on exit");
        let listener = bind(&config).await?;
        let state = AppState::in_memory(Arc::new(MemoryCatalog::new()));
        run_server(listener, state, config, shutdown_signal())
            .await
            .context("Server error")?;
        return Ok(());
    }

    // Both sessions must open before the listener is bound
    let sessions = Sessions::connect(&args.session_config())
        .await
        .context("Failed to open database sessions")?;

    let listener = match bind(&config).await {
        Ok(listener) => listener,
        Err(e) => {
            sessions.close().await;
            return Err(e);
        }
    };

    // Session close is bounded by one more grace period
    let grace = config.shutdown_grace;
    let served = run_server(listener, AppState::postgres(&sessions), config, shutdown_signal()).await;
    sessions.close_within(grace).await;
    served.context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))
}
