//! filmoteka-server: HTTP CRUD service for actors and films
//!
//! - [`models`]: request/record shapes and identifier tokens
//! - [`db`]: writer/reader sessions, repositories, in-memory catalog
//! - [`http`]: route table, handlers, error mapping, server lifecycle

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, SessionConfig, Sessions};
pub use http::{build_router, run_server, shutdown_signal, AppState, ServerConfig, ServerError};
