//! Film repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{DbError, FilmStore};
use crate::db::Sessions;
use crate::models::{Film, FilmRequest};

const RESOURCE: &str = "film";

/// Film row as stored; `rating` is a SMALLINT column.
#[derive(Debug, FromRow)]
struct FilmRow {
    id: i64,
    name: String,
    description: String,
    release: String,
    rating: i16,
}

impl TryFrom<FilmRow> for Film {
    type Error = DbError;

    fn try_from(row: FilmRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating).map_err(|_| DbError::Decode {
            column: "rating",
            value: row.rating.to_string(),
        })?;

        Ok(Film {
            id: row.id,
            name: row.name,
            description: row.description,
            release: row.release,
            rating,
        })
    }
}

/// PostgreSQL-backed film repository
#[derive(Debug, Clone)]
pub struct PgFilmRepo {
    writer: PgPool,
    reader: PgPool,
}

impl PgFilmRepo {
    pub fn new(sessions: &Sessions) -> Self {
        Self {
            writer: sessions.writer().clone(),
            reader: sessions.reader().clone(),
        }
    }
}

#[async_trait]
impl FilmStore for PgFilmRepo {
    async fn create(&self, film: &FilmRequest) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO f.films (film_name, description, release, rating)
            VALUES ($1, $2, $3::date, $4)
            RETURNING film_id::BIGINT
            "#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(&film.release)
        .bind(i16::from(film.rating))
        .fetch_one(&self.writer)
        .await?;

        tracing::debug!(film_id = id, "film inserted");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Film>, DbError> {
        let rows = sqlx::query_as::<_, FilmRow>(
            r#"
            SELECT
                film_id::BIGINT AS id,
                film_name AS name,
                description,
                to_char(release, 'YYYY-MM-DD') AS release,
                rating
            FROM f.films
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(Film::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Film, DbError> {
        let row = sqlx::query_as::<_, FilmRow>(
            r#"
            SELECT
                film_id::BIGINT AS id,
                film_name AS name,
                description,
                to_char(release, 'YYYY-MM-DD') AS release,
                rating
            FROM f.films
            WHERE film_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.reader)
        .await?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })?;

        Film::try_from(row)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM f.films WHERE film_id = $1")
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

    fn row(rating: i16) -> FilmRow {
        FilmRow {
            id: 3,
            name: "Stalker".into(),
            description: "The Zone".into(),
            release: "1979-05-25".into(),
            rating,
        }
    }

    #[test]
    fn row_converts_rating() {
        let film = Film::try_from(row(255)).unwrap();
        assert_eq!(film.rating, 255);
        assert_eq!(film.release, "1979-05-25");
    }

    #[test]
    fn out_of_range_rating_is_a_decode_error() {
        let err = Film::try_from(row(300)).unwrap_err();
        assert!(matches!(err, DbError::Decode { column: "rating", .. }));
        assert!(Film::try_from(row(-1)).is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_get_list_delete() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("pool creation failed");
        sqlx::raw_sql(include_str!("../../../sql/schema.sql"))
            .execute(&pool)
            .await
            .expect("schema");
        let repo = PgFilmRepo::new(&Sessions::from_pools(pool.clone(), pool));

        let req = FilmRequest {
            name: "Stalker".into(),
            description: "The Zone".into(),
            release: "1979-05-25".into(),
            rating: 10,
        };
        let id = repo.create(&req).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), Film::from_request(id, req));
        assert!(repo.list().await.unwrap().iter().any(|f| f.id == id));

        repo.delete(id).await.unwrap();
        assert!(matches!(repo.get(id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.delete(id).await, Err(DbError::NotFound { .. })));
    }
}
