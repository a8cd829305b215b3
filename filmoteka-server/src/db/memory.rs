//! In-memory catalog
//!
//! Implements both store traits over ordered maps. Identifiers come from a
//! per-resource counter and are never reused, even after deletes. Used by
//! the router tests and by `filmoteka serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::repos::{ActorStore, DbError, FilmStore};
use crate::models::{Actor, ActorRequest, Film, FilmRequest};

#[derive(Default)]
struct Inner {
    actors: BTreeMap<i64, Actor>,
    films: BTreeMap<i64, Film>,
    last_actor_id: i64,
    last_film_id: i64,
}

/// Process-local store for actors and films
#[derive(Default)]
pub struct MemoryCatalog {
    inner: Mutex<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored actors.
    pub async fn actor_count(&self) -> usize {
        self.inner.lock().await.actors.len()
    }

    /// Number of stored films.
    pub async fn film_count(&self) -> usize {
        self.inner.lock().await.films.len()
    }
}

#[async_trait]
impl ActorStore for MemoryCatalog {
    async fn create(&self, actor: &ActorRequest) -> Result<i64, DbError> {
        let mut inner = self.inner.lock().await;
        inner.last_actor_id += 1;
        let id = inner.last_actor_id;
        inner.actors.insert(id, Actor::from_request(id, actor.clone()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Actor>, DbError> {
        Ok(self.inner.lock().await.actors.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Actor, DbError> {
        self.inner
            .lock()
            .await
            .actors
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "actor",
                id,
            })
    }

    async fn update(&self, id: i64, actor: &ActorRequest) -> Result<(), DbError> {
        let mut inner = self.inner.lock().await;
        match inner.actors.get_mut(&id) {
            Some(stored) => {
                *stored = Actor::from_request(id, actor.clone());
                Ok(())
            }
            None => Err(DbError::NotFound {
                resource: "actor",
                id,
            }),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.inner
            .lock()
            .await
            .actors
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound {
                resource: "actor",
                id,
            })
    }
}

#[async_trait]
impl FilmStore for MemoryCatalog {
    async fn create(&self, film: &FilmRequest) -> Result<i64, DbError> {
        let mut inner = self.inner.lock().await;
        inner.last_film_id += 1;
        let id = inner.last_film_id;
        inner.films.insert(id, Film::from_request(id, film.clone()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Film>, DbError> {
        Ok(self.inner.lock().await.films.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Film, DbError> {
        self.inner
            .lock()
            .await
            .films
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "film",
                id,
            })
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.inner
            .lock()
            .await
            .films
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound {
                resource: "film",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(name: &str) -> ActorRequest {
        ActorRequest {
            name: name.into(),
            gender: "m".into(),
            birth_date: "1990-01-01".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let catalog = MemoryCatalog::new();
        let first = ActorStore::create(&catalog, &actor("Bob")).await.unwrap();
        ActorStore::delete(&catalog, first).await.unwrap();
        let second = ActorStore::create(&catalog, &actor("Bob")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn actor_and_film_ids_are_independent() {
        let catalog = MemoryCatalog::new();
        ActorStore::create(&catalog, &actor("Bob")).await.unwrap();
        let film = FilmStore::create(&catalog, &FilmRequest::default()).await.unwrap();
        assert_eq!(film, 1);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            ActorStore::get(&catalog, 7).await,
            Err(DbError::NotFound { resource: "actor", id: 7 })
        ));
        assert!(matches!(
            ActorStore::update(&catalog, 7, &actor("Bob")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            FilmStore::delete(&catalog, 7).await,
            Err(DbError::NotFound { resource: "film", .. })
        ));
    }

    #[tokio::test]
    async fn list_matches_stored_rows() {
        let catalog = MemoryCatalog::new();
        for name in ["Ann", "Ben", "Cid"] {
            ActorStore::create(&catalog, &actor(name)).await.unwrap();
        }
        ActorStore::delete(&catalog, 2).await.unwrap();

        let names: Vec<_> = ActorStore::list(&catalog)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Ann", "Cid"]);
        assert_eq!(catalog.actor_count().await, 2);
    }
}
