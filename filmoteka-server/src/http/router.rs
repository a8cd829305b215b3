//! Method + path route table
//!
//! Entries are evaluated in order and the first structural match wins.
//! Collection paths are the resource name followed by any number of
//! slashes (`/actors`, `/actors/`, `/actors//`). Item paths carry one
//! trailing segment shaped like an identifier (`/actors/12`,
//! `/actors/12-7`). Numeric parsing of that segment is left to the
//! handler.

use axum::http::Method;
use once_cell::sync::Lazy;

use crate::models::IdToken;

/// A matched route, carrying the identifier token for item routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateActor,
    ListActors,
    GetActor(IdToken),
    UpdateActor(IdToken),
    DeleteActor(IdToken),
    CreateFilm,
    ListFilms,
    GetFilm(IdToken),
    DeleteFilm(IdToken),
    Health,
}

enum Target {
    Collection(Route),
    Item(fn(IdToken) -> Route),
}

struct RouteEntry {
    method: Method,
    resource: &'static str,
    target: Target,
}

impl RouteEntry {
    fn collection(method: Method, resource: &'static str, route: Route) -> Self {
        Self {
            method,
            resource,
            target: Target::Collection(route),
        }
    }

    fn item(method: Method, resource: &'static str, build: fn(IdToken) -> Route) -> Self {
        Self {
            method,
            resource,
            target: Target::Item(build),
        }
    }

    fn matches(&self, path: &str) -> Option<Route> {
        match (split_path(path, self.resource)?, &self.target) {
            (PathShape::Collection, Target::Collection(route)) => Some(route.clone()),
            (PathShape::Item(segment), Target::Item(build)) => IdToken::new(segment).map(*build),
            _ => None,
        }
    }
}

// PUT /films/{id} is intentionally absent: films have no update operation.
static ROUTES: Lazy<Vec<RouteEntry>> = Lazy::new(|| {
    vec![
        RouteEntry::collection(Method::POST, "actors", Route::CreateActor),
        RouteEntry::collection(Method::GET, "actors", Route::ListActors),
        RouteEntry::item(Method::GET, "actors", Route::GetActor),
        RouteEntry::item(Method::PUT, "actors", Route::UpdateActor),
        RouteEntry::item(Method::DELETE, "actors", Route::DeleteActor),
        RouteEntry::collection(Method::POST, "films", Route::CreateFilm),
        RouteEntry::collection(Method::GET, "films", Route::ListFilms),
        RouteEntry::item(Method::GET, "films", Route::GetFilm),
        RouteEntry::item(Method::DELETE, "films", Route::DeleteFilm),
        RouteEntry::collection(Method::GET, "health", Route::Health),
    ]
});

#[derive(Debug, PartialEq, Eq)]
enum PathShape<'a> {
    Collection,
    Item(&'a str),
}

fn split_path<'a>(path: &'a str, resource: &str) -> Option<PathShape<'a>> {
    let rest = path.strip_prefix('/')?.strip_prefix(resource)?;
    if rest.bytes().all(|b| b == b'/') {
        return Some(PathShape::Collection);
    }
    rest.strip_prefix('/').map(PathShape::Item)
}

impl Route {
    /// Find the route for `method` and `path`, or `None` when nothing in the
    /// table matches.
    pub fn resolve(method: &Method, path: &str) -> Option<Self> {
        ROUTES
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| entry.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> IdToken {
        IdToken::new(s).unwrap()
    }

    #[test]
    fn collection_routes_accept_trailing_slashes() {
        for path in ["/actors", "/actors/", "/actors//"] {
            assert_eq!(Route::resolve(&Method::GET, path), Some(Route::ListActors), "{path}");
            assert_eq!(Route::resolve(&Method::POST, path), Some(Route::CreateActor), "{path}");
        }
        assert_eq!(Route::resolve(&Method::GET, "/films/"), Some(Route::ListFilms));
        assert_eq!(Route::resolve(&Method::POST, "/films/"), Some(Route::CreateFilm));
    }

    #[test]
    fn item_routes_carry_the_token() {
        assert_eq!(
            Route::resolve(&Method::GET, "/actors/12"),
            Some(Route::GetActor(token("12")))
        );
        assert_eq!(
            Route::resolve(&Method::PUT, "/actors/3"),
            Some(Route::UpdateActor(token("3")))
        );
        assert_eq!(
            Route::resolve(&Method::DELETE, "/films/8"),
            Some(Route::DeleteFilm(token("8")))
        );
    }

    #[test]
    fn hyphenated_ids_pass_the_router() {
        assert_eq!(
            Route::resolve(&Method::GET, "/actors/12-7"),
            Some(Route::GetActor(token("12-7")))
        );
    }

    #[test]
    fn film_update_is_not_routed() {
        assert_eq!(Route::resolve(&Method::PUT, "/films/1"), None);
    }

    #[test]
    fn unmatched_shapes_resolve_to_none() {
        let cases = [
            (Method::GET, "/"),
            (Method::GET, "/actor/1"),
            (Method::GET, "/actorsx"),
            (Method::GET, "/actors/abc"),
            (Method::GET, "/actors/1/"),
            (Method::GET, "/actors/1/films"),
            (Method::PUT, "/actors/"),
            (Method::DELETE, "/films/"),
            (Method::POST, "/actors/1"),
            (Method::PATCH, "/actors/1"),
        ];
        for (method, path) in cases {
            assert_eq!(Route::resolve(&method, path), None, "{method} {path}");
        }
    }

    #[test]
    fn health_is_routed() {
        assert_eq!(Route::resolve(&Method::GET, "/health"), Some(Route::Health));
    }
}
