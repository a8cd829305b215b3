//! Path identifiers
//!
//! Identifiers are validated in two stages. The route table only checks the
//! coarse shape of the trailing segment (digit groups joined by hyphens, e.g.
//! `12` or `12-7`); the handler then parses it as one base-10 integer and
//! owns the rejection of anything else.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Trailing path segment that passed the route table's shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    /// Shape check used by the router: one or more groups of ASCII digits
    /// separated by single hyphens.
    ///
    /// ```
    /// use filmoteka_server::models::IdToken;
    ///
    /// assert!(IdToken::matches("12"));
    /// assert!(IdToken::matches("12-7"));
    /// assert!(!IdToken::matches("12-"));
    /// assert!(!IdToken::matches("abc"));
    /// ```
    pub fn matches(segment: &str) -> bool {
        !segment.is_empty()
            && segment
                .split('-')
                .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Wrap `segment` if it has the identifier shape.
    pub fn new(segment: &str) -> Option<Self> {
        Self::matches(segment).then(|| Self(segment.to_owned()))
    }

    /// Parse the token as a single integer. Multi-group tokens such as
    /// `12-7` pass the router but fail here.
    pub fn parse(&self) -> Result<i64, ValidationError> {
        self.0.parse().map_err(|_| ValidationError::InvalidId {
            token: self.0.clone(),
        })
    }
}

/// `{"id": <int>}` returned by create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}
