//! Data access layer - database sessions and repositories
//!
//! - Two pools per process: writer (elevated) and reader (restricted)
//! - One round trip per operation, no caching
//! - Every value is a bound parameter

pub mod pool;
pub mod repos;
pub mod memory;

pub use memory::MemoryCatalog;
pub use pool::{Credentials, SessionConfig, Sessions};
pub use repos::*;
