//! Actor repository
//!
//! Writes go through the writer session, reads through the reader session.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ActorStore, DbError};
use crate::db::Sessions;
use crate::models::{Actor, ActorRequest};

const RESOURCE: &str = "actor";

/// PostgreSQL-backed actor repository
#[derive(Debug, Clone)]
pub struct PgActorRepo {
    writer: PgPool,
    reader: PgPool,
}

impl PgActorRepo {
    pub fn new(sessions: &Sessions) -> Self {
        Self {
            writer: sessions.writer().clone(),
            reader: sessions.reader().clone(),
        }
    }
}

#[async_trait]
impl ActorStore for PgActorRepo {
    async fn create(&self, actor: &ActorRequest) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO f.actors (actor_name, gender, birth_date)
            VALUES ($1, $2, $3::date)
            RETURNING actor_id::BIGINT
            "#,
        )
        .bind(&actor.name)
        .bind(&actor.gender)
        .bind(&actor.birth_date)
        .fetch_one(&self.writer)
        .await?;

        tracing::debug!(actor_id = id, "actor inserted");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Actor>, DbError> {
        let actors = sqlx::query_as::<_, Actor>(
            r#"
            SELECT
                actor_id::BIGINT AS id,
                actor_name AS name,
                gender,
                to_char(birth_date, 'YYYY-MM-DD') AS birth_date
            FROM f.actors
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(actors)
    }

    async fn get(&self, id: i64) -> Result<Actor, DbError> {
        sqlx::query_as::<_, Actor>(
            r#"
            SELECT
                actor_id::BIGINT AS id,
                actor_name AS name,
                gender,
                to_char(birth_date, 'YYYY-MM-DD') AS birth_date
            FROM f.actors
            WHERE actor_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.reader)
        .await?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })
    }

    async fn update(&self, id: i64, actor: &ActorRequest) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE f.actors
            SET actor_name = $1, gender = $2, birth_date = $3::date
            WHERE actor_id = $4
            "#,
        )
        .bind(&actor.name)
        .bind(&actor.gender)
        .bind(&actor.birth_date)
        .bind(id)
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM f.actors WHERE actor_id = $1")
            .bind(id)
            .execute(&self.writer)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p filmoteka-server -- --ignored

    async fn repo() -> PgActorRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("pool creation failed");
        sqlx::raw_sql(include_str!("../../../sql/schema.sql"))
            .execute(&pool)
            .await
            .expect("schema");
        PgActorRepo::new(&Sessions::from_pools(pool.clone(), pool))
    }

    fn request(name: &str) -> ActorRequest {
        ActorRequest {
            name: name.into(),
            gender: "f".into(),
            birth_date: "1985-07-14".into(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_returns_assigned_id() {
        let repo = repo().await;
        let first = repo.create(&request("Ada")).await.unwrap();
        let second = repo.create(&request("Grace")).await.unwrap();
        assert_ne!(first, second);

        let stored = repo.get(second).await.unwrap();
        assert_eq!(stored, Actor::from_request(second, request("Grace")));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_rows_are_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.update(-1, &request("Nobody")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(repo.delete(-1).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_overwrites_every_field() {
        let repo = repo().await;
        let id = repo.create(&request("Ada")).await.unwrap();
        let changed = ActorRequest {
            name: "Ada L.".into(),
            gender: "x".into(),
            birth_date: "1815-12-10".into(),
        };
        repo.update(id, &changed).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), Actor::from_request(id, changed));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn malformed_date_is_invalid_input() {
        let repo = repo().await;
        let mut bad = request("Ada");
        bad.birth_date = "yesterday-ish".into();
        assert!(matches!(repo.create(&bad).await, Err(DbError::InvalidInput(_))));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bound_values_are_not_interpreted_as_sql() {
        let repo = repo().await;
        let name = "Bob'); DROP TABLE f.actors; --";
        let id = repo.create(&request(name)).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap().name, name);
    }
}
