//! Repository traits and their PostgreSQL implementations
//!
//! Handlers only see the [`ActorStore`] and [`FilmStore`] traits, so the
//! same routes run against PostgreSQL or the in-memory catalog.

pub mod actors;
pub mod films;

use async_trait::async_trait;

use crate::models::{Actor, ActorRequest, Film, FilmRequest};

pub use actors::PgActorRepo;
pub use films::PgFilmRepo;

/// SQLSTATE class for data exceptions (bad date literal, numeric overflow).
const DATA_EXCEPTION_CLASS: &str = "22";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    /// The store refused a bound value as malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unexpected {column} value in stored row: {value}")]
    Decode { column: &'static str, value: String },

    #[error("failed to open {session} session: {source}")]
    Connect {
        session: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.code().is_some_and(|code| code.starts_with(DATA_EXCEPTION_CLASS)) {
                return Self::InvalidInput(db.message().to_owned());
            }
        }
        Self::Sqlx(e)
    }
}

/// Actor persistence
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// Insert a row and return the identifier the store assigned.
    async fn create(&self, actor: &ActorRequest) -> Result<i64, DbError>;

    /// Every stored actor, in store order.
    async fn list(&self) -> Result<Vec<Actor>, DbError>;

    async fn get(&self, id: i64) -> Result<Actor, DbError>;

    /// Overwrite all mutable fields. Missing rows are [`DbError::NotFound`].
    async fn update(&self, id: i64, actor: &ActorRequest) -> Result<(), DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// Film persistence (no update in current scope)
#[async_trait]
pub trait FilmStore: Send + Sync {
    async fn create(&self, film: &FilmRequest) -> Result<i64, DbError>;

    async fn list(&self) -> Result<Vec<Film>, DbError>;

    async fn get(&self, id: i64) -> Result<Film, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_resource() {
        let err = DbError::NotFound {
            resource: "actor",
            id: 999_999,
        };
        assert_eq!(err.to_string(), "not found: actor '999999'");
    }

    #[test]
    fn non_database_errors_stay_internal() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
