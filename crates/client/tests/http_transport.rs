//! HeroService over HttpTransport against a stub hero API served by axum.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use heroes_client::infrastructure::clock::SystemClock;
use heroes_client::infrastructure::http_transport::HttpTransport;
use heroes_client::infrastructure::message_log::InMemoryMessageLog;
use heroes_client::{Hero, HeroId, HeroService, NewHero};

struct StubApi {
    heroes: Mutex<Vec<Hero>>,
    write_content_types: Mutex<Vec<(&'static str, Option<String>)>>,
}

impl StubApi {
    fn new(heroes: Vec<Hero>) -> Arc<Self> {
        Arc::new(Self {
            heroes: Mutex::new(heroes),
            write_content_types: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, method: &'static str, headers: &HeaderMap) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.write_content_types
            .lock()
            .unwrap()
            .push((method, content_type));
    }
}

#[derive(Deserialize)]
struct NameQuery {
    name: String,
}

async fn list(State(api): State<Arc<StubApi>>) -> Json<Vec<Hero>> {
    let heroes = api.heroes.lock().unwrap().clone();
    Json(heroes)
}

async fn search(State(api): State<Arc<StubApi>>, Query(q): Query<NameQuery>) -> Json<Vec<Hero>> {
    let needle = q.name.to_lowercase();
    let heroes = api
        .heroes
        .lock()
        .unwrap()
        .iter()
        .filter(|h| h.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(heroes)
}

async fn get_one(
    State(api): State<Arc<StubApi>>,
    Path(id): Path<i64>,
) -> Result<Json<Hero>, StatusCode> {
    let hero = api
        .heroes
        .lock()
        .unwrap()
        .iter()
        .find(|h| h.id == HeroId::new(id))
        .cloned();
    hero.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(hero): Json<Hero>,
) -> StatusCode {
    api.record("PUT", &headers);
    let mut heroes = api.heroes.lock().unwrap();
    match heroes.iter_mut().find(|h| h.id == hero.id) {
        Some(slot) => {
            *slot = hero;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn add(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(new_hero): Json<NewHero>,
) -> (StatusCode, Json<Hero>) {
    api.record("POST", &headers);
    let mut heroes = api.heroes.lock().unwrap();
    let id = heroes.iter().map(|h| h.id.value()).max().unwrap_or(10) + 1;
    let hero = Hero::new(id, new_hero.name);
    heroes.push(hero.clone());
    (StatusCode::CREATED, Json(hero))
}

async fn remove(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> StatusCode {
    api.record("DELETE", &headers);
    let mut heroes = api.heroes.lock().unwrap();
    let before = heroes.len();
    heroes.retain(|h| h.id != HeroId::new(id));
    if heroes.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn spawn_stub_api(api: Arc<StubApi>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let router = Router::new()
        .route("/api/heroes", get(list).put(update).post(add))
        .route("/api/heroes/", get(search))
        .route("/api/heroes/{id}", get(get_one).delete(remove))
        .route("/broken/heroes", get(|| async { "definitely not json" }))
        .with_state(api);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

fn client(base_url: &str) -> (HeroService, Arc<InMemoryMessageLog>) {
    let log = Arc::new(InMemoryMessageLog::new(Arc::new(SystemClock::new())));
    let service = HeroService::new(Arc::new(HttpTransport::new(base_url)), log.clone());
    (service, log)
}

fn roster() -> Vec<Hero> {
    vec![
        Hero::new(11, "Dr Nice"),
        Hero::new(12, "Narco"),
        Hero::new(16, "RubberMan"),
    ]
}

#[tokio::test]
async fn crud_round_trip_over_http() {
    let api = StubApi::new(roster());
    let addr = spawn_stub_api(api.clone()).await;
    let (heroes, log) = client(&format!("http://{addr}/api/heroes"));

    assert_eq!(heroes.get_heroes().await, roster());
    assert_eq!(
        heroes.get_hero(HeroId::new(12)).await,
        Some(Hero::new(12, "Narco"))
    );
    assert_eq!(
        heroes.search_heroes("man").await,
        vec![Hero::new(16, "RubberMan")]
    );

    let added = heroes.add_hero(&NewHero::new("NewHero")).await;
    assert_eq!(added, Some(Hero::new(17, "NewHero")));

    let updated = heroes.update_hero(&Hero::new(17, "Renamed")).await;
    assert_eq!(updated, Some(serde_json::Value::Null));

    let deleted = heroes.delete_hero(Hero::new(11, "Dr Nice")).await;
    assert_eq!(deleted, Some(serde_json::Value::Null));

    assert_eq!(
        *api.heroes.lock().unwrap(),
        vec![
            Hero::new(12, "Narco"),
            Hero::new(16, "RubberMan"),
            Hero::new(17, "Renamed"),
        ]
    );
    assert_eq!(
        log.texts(),
        vec![
            "HeroService: fetched heroes",
            "HeroService: fetched hero id=12",
            "HeroService: found heroes matching \"man\"",
            "HeroService: added hero with id=17",
            "HeroService: updated hero id=17",
            "HeroService: deleted hero id=11",
        ]
    );
}

#[tokio::test]
async fn write_requests_declare_json_content_type() {
    let api = StubApi::new(roster());
    let addr = spawn_stub_api(api.clone()).await;
    let (heroes, _log) = client(&format!("http://{addr}/api/heroes/"));

    heroes.add_hero(&NewHero::new("NewHero")).await;
    heroes.update_hero(&Hero::new(12, "Narco II")).await;
    heroes.delete_hero(12).await;

    let recorded = api.write_content_types.lock().unwrap().clone();
    assert_eq!(recorded.len(), 3);
    for (method, content_type) in recorded {
        assert_eq!(
            content_type.as_deref(),
            Some("application/json"),
            "{method} request missing JSON content type"
        );
    }
}

#[tokio::test]
async fn missing_hero_logs_http_status() {
    let addr = spawn_stub_api(StubApi::new(roster())).await;
    let (heroes, log) = client(&format!("http://{addr}/api/heroes"));

    assert_eq!(heroes.get_hero(HeroId::new(99)).await, None);
    assert_eq!(heroes.delete_hero(99).await, None);

    assert_eq!(
        log.texts(),
        vec![
            format!(
                "HeroService: getHero id=99 failed: Http failure response for http://{addr}/api/heroes/99: 404 Not Found"
            ),
            format!(
                "HeroService: deleteHero failed: Http failure response for http://{addr}/api/heroes/99: 404 Not Found"
            ),
        ]
    );
}

#[tokio::test]
async fn unparseable_body_falls_back() {
    let addr = spawn_stub_api(StubApi::new(roster())).await;
    let (heroes, log) = client(&format!("http://{addr}/broken/heroes"));

    assert!(heroes.get_heroes().await.is_empty());

    let texts = log.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with(&format!(
        "HeroService: getHeroes failed: Http failure during parsing for http://{addr}/broken/heroes"
    )));
}

#[tokio::test]
async fn unreachable_server_falls_back() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (heroes, log) = client(&format!("http://{addr}/api/heroes"));

    assert!(heroes.get_heroes().await.is_empty());
    assert!(heroes.search_heroes("man").await.is_empty());
    assert_eq!(heroes.add_hero(&NewHero::new("Ghost")).await, None);

    let texts = log.texts();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].starts_with(&format!(
        "HeroService: getHeroes failed: Http failure response for http://{addr}/api/heroes: "
    )));
    assert!(texts[1].starts_with("HeroService: searchHeroes failed: "));
    assert!(texts[2].starts_with("HeroService: addHero failed: "));
}
