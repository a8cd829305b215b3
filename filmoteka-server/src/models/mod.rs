//! Domain models with validation at construction
//!
//! Request shapes are decoded strictly (unknown keys rejected) and then
//! checked for presence before they reach the data access layer.

pub mod validation;
pub mod actor;
pub mod film;
pub mod id;

pub use validation::ValidationError;
pub use actor::{Actor, ActorRequest};
pub use film::{Film, FilmRequest};
pub use id::{CreatedId, IdToken};
