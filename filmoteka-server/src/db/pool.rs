//! Database sessions
//!
//! The service holds two pools for its whole lifetime: a writer pool opened
//! with elevated credentials (create/update/delete) and a reader pool opened
//! with read-only credentials (list/get). Failing to open either is fatal.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use super::repos::DbError;

/// Default maximum connections per pool.
/// Kept low; every request is a single round trip.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// User name and optional password for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: Option<String>) -> Self {
        Self {
            user: user.into(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Where and how to open the two sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Elevated credentials used for writes
    pub admin: Credentials,
    /// Read-only credentials used for list/get
    pub reader: Credentials,
    /// Pool size, applied to each session
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "filmoteka".to_string(),
            admin: Credentials::new("adm", None),
            reader: Credentials::new("u", None),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Connection options for one credential pair.
    ///
    /// Built field by field so the password never passes through a URL or
    /// a formatted string.
    pub fn connect_options(&self, credentials: &Credentials) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&credentials.user);

        match &credentials.password {
            Some(password) => options.password(password),
            None => options,
        }
    }

    async fn open(&self, credentials: &Credentials) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect_with(self.connect_options(credentials))
            .await
    }
}

/// The writer and reader pools.
#[derive(Debug, Clone)]
pub struct Sessions {
    writer: PgPool,
    reader: PgPool,
}

impl Sessions {
    /// Open both sessions.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connect`] naming the session that could not be
    /// opened. A writer pool that was already open is closed first.
    pub async fn connect(config: &SessionConfig) -> Result<Self, DbError> {
        let writer = config
            .open(&config.admin)
            .await
            .map_err(|source| DbError::Connect {
                session: "writer",
                source,
            })?;

        let reader = match config.open(&config.reader).await {
            Ok(pool) => pool,
            Err(source) => {
                writer.close().await;
                return Err(DbError::Connect {
                    session: "reader",
                    source,
                });
            }
        };

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            admin_user = %config.admin.user,
            reader_user = %config.reader.user,
            "database sessions opened"
        );

        Ok(Self { writer, reader })
    }

    /// Wrap pools that were opened elsewhere (tests use one URL for both).
    pub fn from_pools(writer: PgPool, reader: PgPool) -> Self {
        Self { writer, reader }
    }

    pub fn writer(&self) -> &PgPool {
        &self.writer
    }

    pub fn reader(&self) -> &PgPool {
        &self.reader
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
        tracing::info!("database sessions closed");
    }

    /// [`close`](Self::close), giving up after `limit`. Both pools refuse new
    /// acquires either way; returns `false` if connections were still checked
    /// out when the limit ran out.
    pub async fn close_within(&self, limit: Duration) -> bool {
        if tokio::time::timeout(limit, self.close()).await.is_ok() {
            return true;
        }
        tracing::warn!(?limit, "database sessions still busy, closing without waiting");
        false
    }
}
