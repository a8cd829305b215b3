//! Actor request and record shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{require, require_date, ValidationError};

/// Body of `POST /actors/` and `PUT /actors/{id}`.
///
/// Absent keys decode to empty strings so the presence check below can name
/// the missing field; unknown keys are a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorRequest {
    pub name: String,
    pub gender: String,
    pub birth_date: String,
}

impl ActorRequest {
    /// Every field must be non-empty and `birth_date` must be `YYYY-MM-DD`.
    ///
    /// # Example
    /// ```
    /// use filmoteka_server::models::ActorRequest;
    ///
    /// let ok = ActorRequest {
    ///     name: "Bob".into(),
    ///     gender: "m".into(),
    ///     birth_date: "1990-01-01".into(),
    /// };
    /// assert!(ok.validate().is_ok());
    /// assert!(ActorRequest::default().validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("gender", &self.gender)?;
        require_date("birth_date", &self.birth_date)?;
        Ok(())
    }
}

/// Stored actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub birth_date: String,
}

impl Actor {
    pub fn from_request(id: i64, req: ActorRequest) -> Self {
        Self {
            id,
            name: req.name,
            gender: req.gender,
            birth_date: req.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> ActorRequest {
        ActorRequest {
            name: "Bob".into(),
            gender: "m".into(),
            birth_date: "1990-01-01".into(),
        }
    }

    #[test]
    fn reports_first_empty_field() {
        let mut req = bob();
        req.gender.clear();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Empty { field: "gender" }
        );

        let mut req = bob();
        req.birth_date.clear();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Empty { field: "birth_date" }
        );
    }

    #[test]
    fn missing_keys_decode_as_empty() {
        let req: ActorRequest = serde_json::from_str(r#"{"name":"Bob"}"#).unwrap();
        assert_eq!(req.gender, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_str::<ActorRequest>(
            r#"{"name":"Bob","gender":"m","birth_date":"1990-01-01","age":34}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `age`"));
    }

    #[test]
    fn record_serializes_in_wire_shape() {
        let actor = Actor::from_request(1, bob());
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Bob",
                "gender": "m",
                "birth_date": "1990-01-01"
            })
        );
    }
}
