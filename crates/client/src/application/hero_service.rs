//! Hero Service - data access for the hero collection
//!
//! Every operation issues exactly one request through the injected
//! [`TransportPort`] and records what happened in the injected
//! [`MessageLogPort`]. Failures never reach the caller: they are reported to
//! `tracing`, logged as `"<operation> failed: <message>"`, and replaced by
//! the operation's fallback value (empty `Vec` or `None`).
//!
//! As a consequence callers cannot tell an empty result from a failed
//! request. Read the message log when that distinction matters.

use std::sync::Arc;

use heroes_domain::{Hero, HeroId, HeroRef, NewHero};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::ports::{MessageLogPort, TransportError, TransportPort};

/// Prefix attached to every message this service records.
const LOG_PREFIX: &str = "HeroService";

/// The hero collection itself, relative to the transport's base URL.
const HEROES_PATH: &str = "";

/// Hero service for reading and editing heroes
///
/// Cheap to clone; clones share the same transport and message log.
#[derive(Clone)]
pub struct HeroService {
    transport: Arc<dyn TransportPort>,
    messages: Arc<dyn MessageLogPort>,
}

impl HeroService {
    /// Create a new HeroService with the given transport and message log
    pub fn new(transport: Arc<dyn TransportPort>, messages: Arc<dyn MessageLogPort>) -> Self {
        Self {
            transport,
            messages,
        }
    }

    /// List all heroes. Falls back to an empty list.
    pub async fn get_heroes(&self) -> Vec<Hero> {
        match self.get::<Vec<Hero>>(HEROES_PATH).await {
            Ok(heroes) => {
                self.log("fetched heroes");
                heroes
            }
            Err(e) => self.handle_error("getHeroes", e, Vec::new()),
        }
    }

    /// Get a hero by id. Falls back to `None`.
    pub async fn get_hero(&self, id: HeroId) -> Option<Hero> {
        match self.get::<Hero>(&item_path(id)).await {
            Ok(hero) => {
                self.log(&format!("fetched hero id={id}"));
                Some(hero)
            }
            Err(e) => self.handle_error(&format!("getHero id={id}"), e, None),
        }
    }

    /// Replace a hero in full.
    ///
    /// Returns the server's response body untouched (`Value::Null` when the
    /// server answers with no content), or `None` on failure.
    pub async fn update_hero(&self, hero: &Hero) -> Option<Value> {
        let result = match encode(hero) {
            Ok(body) => self.transport.put_json(HEROES_PATH, &body).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                self.log(&format!("updated hero id={}", hero.id));
                Some(response)
            }
            Err(e) => self.handle_error("updateHero", e, None),
        }
    }

    /// Create a hero; the store assigns the id. Returns the stored record.
    pub async fn add_hero(&self, hero: &NewHero) -> Option<Hero> {
        let result = match encode(hero) {
            Ok(body) => self
                .transport
                .post_json(HEROES_PATH, &body)
                .await
                .and_then(|value| decode::<Hero>(HEROES_PATH, value)),
            Err(e) => Err(e),
        };

        match result {
            Ok(new_hero) => {
                self.log(&format!("added hero with id={}", new_hero.id));
                Some(new_hero)
            }
            Err(e) => self.handle_error("addHero", e, None),
        }
    }

    /// Delete a hero, given either the record or its bare id.
    ///
    /// Returns the server's response body untouched, or `None` on failure.
    pub async fn delete_hero(&self, hero: impl Into<HeroRef>) -> Option<Value> {
        let id = hero.into().id();

        match self.transport.delete_json(&item_path(id)).await {
            Ok(response) => {
                self.log(&format!("deleted hero id={id}"));
                Some(response)
            }
            Err(e) => self.handle_error("deleteHero", e, None),
        }
    }

    /// Find heroes whose name matches `term`.
    ///
    /// A blank term returns an empty list without contacting the transport
    /// and without logging.
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        match self.get::<Vec<Hero>>(&search_path(term)).await {
            Ok(heroes) => {
                if heroes.is_empty() {
                    self.log(&format!("no heroes matching \"{term}\""));
                } else {
                    self.log(&format!("found heroes matching \"{term}\""));
                }
                heroes
            }
            Err(e) => self.handle_error("searchHeroes", e, Vec::new()),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let value = self.transport.get_json(path).await?;
        decode(path, value)
    }

    fn log(&self, message: &str) {
        self.messages.add(&format!("{LOG_PREFIX}: {message}"));
    }

    fn handle_error<T>(&self, operation: &str, error: TransportError, fallback: T) -> T {
        tracing::error!(operation, error = %error, "hero request failed");
        self.log(&format!("{operation} failed: {error}"));
        fallback
    }
}

fn item_path(id: HeroId) -> String {
    format!("/{id}")
}

fn search_path(term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!("/?name={encoded}")
}

fn encode<B: Serialize>(body: &B) -> Result<Value, TransportError> {
    serde_json::to_value(body).map_err(TransportError::encode)
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::decode(path, e))
}
