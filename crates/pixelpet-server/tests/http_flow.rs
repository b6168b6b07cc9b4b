//! End-to-end HTTP tests against the router.
//!
//! Drives register → login → act → reset through `tower::ServiceExt::oneshot`
//! with a real `FileStore` in a temp directory. No socket is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pixelpet_server::{create_app, run_decay_pass, FileStore, ServerState, TokenKeys, UserStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// ── Helpers ────────────────────────────────────────────────────────────

struct Harness {
    _dir: TempDir,
    store: FileStore,
    app: Router,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let shared: Arc<dyn UserStore> = Arc::new(store.clone());
    let state = ServerState::new(
        shared,
        TokenKeys::new(b"http-flow-secret", Duration::from_secs(600)),
    );
    Harness {
        _dir: dir,
        store,
        app: create_app(state, None),
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// POST a raw body, optionally without a JSON content type.
async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(Method::POST).uri(uri);
    if let Some(ct) = content_type {
        req = req.header(header::CONTENT_TYPE, ct);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({"username": username, "password": "pw123", "petName": "Bit"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": username, "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// ── Health ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_u64().unwrap() > 0);
}

// ── Accounts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn register_creates_default_pet() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/register",
        None,
        Some(json!({"username": "alice", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());

    let pet = h.store.load("alice").unwrap().pet;
    assert_eq!(pet.name, "Pixel");
    assert_eq!((pet.hunger, pet.happiness, pet.energy), (50, 50, 50));
}

#[tokio::test]
async fn register_rejects_missing_and_duplicate() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/register",
        None,
        Some(json!({"password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let req = json!({"username": "alice", "password": "pw"});
    let (status, _) = send(&h.app, Method::POST, "/register", None, Some(req.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&h.app, Method::POST, "/register", None, Some(req)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn register_rejects_unsafe_username() {
    let h = harness();
    let (status, _) = send(
        &h.app,
        Method::POST,
        "/register",
        None,
        Some(json!({"username": "../../etc", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(h.store.usernames().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests_with_error_json() {
    let h = harness();
    let cases = [
        ("/register", Some("application/json"), r#"{"username":5,"password":"pw"}"#),
        ("/register", Some("application/json"), "{"),
        ("/register", None, r#"{"username":"alice","password":"pw"}"#),
        ("/login", Some("application/json"), r#"{"username":["a"]}"#),
        ("/login", Some("text/plain"), r#"{"username":"alice","password":"pw"}"#),
    ];
    for (uri, content_type, body) in cases {
        let (status, value) = post_raw(&h.app, uri, content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {content_type:?} {body}");
        assert!(value["error"].is_string(), "{uri} {content_type:?} {body}");
    }
    assert!(h.store.usernames().unwrap().is_empty());
}

#[tokio::test]
async fn login_returns_token_and_pet() {
    let h = harness();
    register_and_login(&h.app, "alice").await;
    let (_, body) = send(
        &h.app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "alice", "password": "pw123"})),
    )
    .await;
    assert_eq!(body["pet"]["name"], "Bit");
    assert_eq!(body["pet"]["isAlive"], true);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let h = harness();
    register_and_login(&h.app, "alice").await;
    for creds in [
        json!({"username": "alice", "password": "wrong"}),
        json!({"username": "nobody", "password": "pw123"}),
    ] {
        let (status, body) = send(&h.app, Method::POST, "/login", None, Some(creds)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }
}

// ── Pet actions ────────────────────────────────────────────────────────

#[tokio::test]
async fn pet_routes_require_token() {
    let h = harness();
    for (method, uri) in [
        (Method::GET, "/pet"),
        (Method::POST, "/feed"),
        (Method::POST, "/reset"),
    ] {
        let (status, _) = send(&h.app, method.clone(), uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        let (status, _) = send(&h.app, method, uri, Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn actions_update_and_persist() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;

    let (status, pet) = send(&h.app, Method::POST, "/feed", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["hunger"], 35);
    assert_eq!(pet["energy"], 55);
    assert_eq!(pet["achievements"]["feedCount"], 1);

    let (_, pet) = send(&h.app, Method::POST, "/play", Some(&token), None).await;
    assert_eq!(pet["happiness"], 65);
    let (_, pet) = send(&h.app, Method::POST, "/sleep", Some(&token), None).await;
    assert_eq!(pet["energy"], 75);

    let (_, pet) = send(&h.app, Method::GET, "/pet", Some(&token), None).await;
    assert_eq!(pet["hunger"], 50);
    assert_eq!(h.store.load("alice").unwrap().pet.achievements.sleep_count, 1);
}

#[tokio::test]
async fn api_prefix_serves_the_same_routes() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;
    let (status, pet) = send(&h.app, Method::POST, "/api/feed", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["achievements"]["feedCount"], 1);
}

#[tokio::test]
async fn mood_reflects_stats() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;
    let (status, body) = send(&h.app, Method::GET, "/pet/mood", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], "okay");
    assert_eq!(body["message"], "I'm feeling okay!");
}

#[tokio::test]
async fn dead_pet_ignores_actions_until_reset() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;

    // Five naps drive hunger from 50 to 100.
    for _ in 0..5 {
        send(&h.app, Method::POST, "/sleep", Some(&token), None).await;
    }
    let (_, pet) = send(&h.app, Method::GET, "/pet", Some(&token), None).await;
    assert_eq!(pet["isAlive"], false);
    let unlocked = pet["achievements"]["unlocked"].as_array().unwrap().clone();
    assert!(unlocked.contains(&json!("Grim Reaper")));
    assert!(unlocked.contains(&json!("Sleep Expert")));

    let (status, after) = send(&h.app, Method::POST, "/feed", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, pet);

    let (_, revived) = send(&h.app, Method::POST, "/reset", Some(&token), None).await;
    assert_eq!(revived["isAlive"], true);
    assert_eq!(revived["name"], "Bit");
    assert_eq!(revived["hunger"], 50);
    assert_eq!(revived["achievements"]["sleepCount"], 0);
    assert!(revived["achievements"]["unlocked"]
        .as_array()
        .unwrap()
        .contains(&json!("Grim Reaper")));
}

#[tokio::test]
async fn token_for_missing_record_is_not_found() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;
    std::fs::remove_file(h.store.users_dir().join("alice.json")).unwrap();
    let (status, _) = send(&h.app, Method::GET, "/pet", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn corrupt_record_is_internal_error() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;
    std::fs::write(h.store.users_dir().join("alice.json"), "{").unwrap();
    let (status, body) = send(&h.app, Method::POST, "/feed", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn decay_pass_is_visible_through_the_api() {
    let h = harness();
    let token = register_and_login(&h.app, "alice").await;
    let report = run_decay_pass(&h.store);
    assert_eq!(report.decayed, 1);
    let (_, pet) = send(&h.app, Method::GET, "/pet", Some(&token), None).await;
    assert_eq!(pet["hunger"], 52);
    assert_eq!(pet["happiness"], 49);
    assert_eq!(pet["energy"], 49);
}
