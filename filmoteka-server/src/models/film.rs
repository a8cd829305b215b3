//! Film request and record shapes

use serde::{Deserialize, Serialize};

use super::validation::{require, require_date, ValidationError};

/// Body of `POST /films/`.
///
/// `rating` is a `u8`, so anything outside 0..=255 fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilmRequest {
    pub name: String,
    pub description: String,
    pub release: String,
    pub rating: u8,
}

impl FilmRequest {
    /// Name and a `YYYY-MM-DD` release date are required; description may
    /// be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_date("release", &self.release)?;
        Ok(())
    }
}

/// Stored film
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release: String,
    pub rating: u8,
}

impl Film {
    pub fn from_request(id: i64, req: FilmRequest) -> Self {
        Self {
            id,
            name: req.name,
            description: req.description,
            release: req.release,
            rating: req.rating,
        }
    }
}
