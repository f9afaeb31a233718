//! In-memory hero store exposed through the transport port
//!
//! Emulates a REST hero collection inside the process so the client can run
//! without a server. Behaviour mirrors a typical in-memory web API:
//! - `GET ""` lists, `GET "/{id}"` fetches, `GET "/?name=t"` searches
//!   (case-insensitive substring on the name)
//! - `POST ""` assigns the next id (`max + 1`, or 11 for an empty store)
//! - `PUT ""` replaces the record with the same id and answers with no body
//! - `DELETE "/{id}"` removes the record and answers with no body
//!
//! Unknown ids answer 404, malformed paths or bodies 400.

use async_trait::async_trait;
use heroes_domain::{Hero, HeroId, NewHero};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::ports::{TransportError, TransportPort};

/// Collection URL used in error messages produced by the in-memory store.
pub const IN_MEMORY_HEROES_URL: &str = "api/heroes";

/// First id handed out by an empty store.
const FIRST_GENERATED_ID: i64 = 11;

/// The heroes a fresh store starts with.
pub fn seed_heroes() -> Vec<Hero> {
    vec![
        Hero::new(11, "Dr Nice"),
        Hero::new(12, "Narco"),
        Hero::new(13, "Bombasto"),
        Hero::new(14, "Celeritas"),
        Hero::new(15, "Magneta"),
        Hero::new(16, "RubberMan"),
        Hero::new(17, "Dynama"),
        Hero::new(18, "Dr IQ"),
        Hero::new(19, "Magma"),
        Hero::new(20, "Tornado"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Collection,
    Item(HeroId),
    Search(String),
}

pub struct InMemoryTransport {
    heroes: RwLock<Vec<Hero>>,
}

impl InMemoryTransport {
    pub fn new(heroes: Vec<Hero>) -> Self {
        Self {
            heroes: RwLock::new(heroes),
        }
    }

    /// Store pre-populated with [`seed_heroes`].
    pub fn seeded() -> Self {
        Self::new(seed_heroes())
    }

    /// Current contents of the store, in insertion order.
    pub async fn snapshot(&self) -> Vec<Hero> {
        self.heroes.read().await.clone()
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::seeded()
    }
}

fn url_for(path: &str) -> String {
    format!("{IN_MEMORY_HEROES_URL}{path}")
}

fn bad_request(path: &str) -> TransportError {
    TransportError::status(url_for(path), 400, "Bad Request")
}

fn not_found(path: &str) -> TransportError {
    TransportError::status(url_for(path), 404, "Not Found")
}

fn method_not_allowed(path: &str) -> TransportError {
    TransportError::status(url_for(path), 405, "Method Not Allowed")
}

fn parse_route(path: &str) -> Result<Route, TransportError> {
    let (resource, query) = match path.split_once('?') {
        Some((resource, query)) => (resource, Some(query)),
        None => (path, None),
    };

    let resource = resource.trim_matches('/');
    if resource.is_empty() {
        let term = query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "name")
                .map(|(_, value)| value.into_owned())
        });
        return Ok(match term {
            Some(term) => Route::Search(term),
            None => Route::Collection,
        });
    }

    resource
        .parse::<HeroId>()
        .map(Route::Item)
        .map_err(|_| bad_request(path))
}

fn to_value(path: &str, value: impl serde::Serialize) -> Result<Value, TransportError> {
    serde_json::to_value(value).map_err(|e| TransportError::decode(url_for(path), e))
}

#[async_trait]
impl TransportPort for InMemoryTransport {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let heroes = self.heroes.read().await;
        match parse_route(path)? {
            Route::Collection => to_value(path, &*heroes),
            Route::Item(id) => {
                let hero = heroes
                    .iter()
                    .find(|h| h.id == id)
                    .ok_or_else(|| not_found(path))?;
                to_value(path, hero)
            }
            Route::Search(term) => {
                let needle = term.to_lowercase();
                let matches: Vec<&Hero> = heroes
                    .iter()
                    .filter(|h| h.name.to_lowercase().contains(&needle))
                    .collect();
                to_value(path, matches)
            }
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        if parse_route(path)? != Route::Collection {
            return Err(method_not_allowed(path));
        }
        let new_hero: NewHero =
            serde_json::from_value(body.clone()).map_err(|_| bad_request(path))?;

        let mut heroes = self.heroes.write().await;
        let id = heroes
            .iter()
            .map(|h| h.id.value())
            .max()
            .map_or(FIRST_GENERATED_ID, |max| max + 1);
        let hero = Hero::new(id, new_hero.name);
        heroes.push(hero.clone());
        tracing::debug!(hero_id = %hero.id, "in-memory store added hero");

        to_value(path, hero)
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        if parse_route(path)? != Route::Collection {
            return Err(method_not_allowed(path));
        }
        let hero: Hero = serde_json::from_value(body.clone()).map_err(|_| bad_request(path))?;

        let mut heroes = self.heroes.write().await;
        let slot = heroes
            .iter_mut()
            .find(|h| h.id == hero.id)
            .ok_or_else(|| not_found(path))?;
        *slot = hero;

        Ok(Value::Null)
    }

    async fn delete_json(&self, path: &str) -> Result<Value, TransportError> {
        let Route::Item(id) = parse_route(path)? else {
            return Err(method_not_allowed(path));
        };

        let mut heroes = self.heroes.write().await;
        let index = heroes
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| not_found(path))?;
        heroes.remove(index);

        Ok(Value::Null)
    }
}
