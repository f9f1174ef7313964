//! In-process stub of the backend identity endpoints.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
struct Inner {
    users: HashMap<String, Map<String, Value>>,
    tokens: HashMap<String, String>,
    issued: u32,
    malformed_profile: bool,
}

/// Backend double speaking the `/login`, `/register`, `/user/me` contract.
#[derive(Clone, Default)]
pub struct StubBackend {
    inner: Arc<Mutex<Inner>>,
}

impl StubBackend {
    /// Starts the stub on an ephemeral port and returns its base URL.
    pub async fn spawn() -> (Self, String) {
        Self::spawn_under("").await
    }

    /// Starts the stub with every route below `prefix` (e.g. `/api`).
    pub async fn spawn_under(prefix: &str) -> (Self, String) {
        let backend = Self::default();
        let routes = Router::new()
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/user/me", get(current_user))
            .with_state(backend.clone());
        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });
        (backend, format!("http://{addr}{prefix}"))
    }

    /// Registers a user directly.
    pub fn add_user(&self, username: &str, password: &str, extra: Value) {
        let mut attributes = extra.as_object().cloned().unwrap_or_default();
        attributes.insert("username".into(), json!(username));
        attributes.insert("password".into(), json!(password));
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), attributes);
    }

    /// Invalidates every issued token.
    pub fn revoke_tokens(&self) {
        self.inner.lock().unwrap().tokens.clear();
    }

    /// Makes `/user/me` answer 200 without a `user` field.
    pub fn break_profiles(&self) {
        self.inner.lock().unwrap().malformed_profile = true;
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.inner.lock().unwrap().users.contains_key(username)
    }
}

/// A base URL where nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}")
}

async fn login(State(backend): State<StubBackend>, Json(body): Json<Value>) -> Reply {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let mut inner = backend.inner.lock().unwrap();
    let password_ok = inner
        .users
        .get(username)
        .map(|user| user.get("password") == Some(&json!(password)));
    match password_ok {
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "User not found"})),
        ),
        Some(false) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid password"})),
        ),
        Some(true) => {
            inner.issued += 1;
            let token = format!("stub-token-{}-{username}", inner.issued);
            inner.tokens.insert(token.clone(), username.to_string());
            (StatusCode::OK, Json(json!({"token": token})))
        }
    }
}

async fn register(State(backend): State<StubBackend>, Json(body): Json<Value>) -> Reply {
    let Some(attributes) = body.as_object().cloned() else {
        return (StatusCode::BAD_REQUEST, Json(json!({})));
    };
    let Some(username) = attributes.get("username").and_then(Value::as_str) else {
        return (StatusCode::BAD_REQUEST, Json(json!({})));
    };
    let username = username.to_string();

    let mut inner = backend.inner.lock().unwrap();
    if inner.users.contains_key(&username) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Username already exists"})),
        );
    }
    inner.users.insert(username, attributes);
    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully"})),
    )
}

async fn current_user(State(backend): State<StubBackend>, headers: HeaderMap) -> Reply {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let inner = backend.inner.lock().unwrap();
    let profile = inner
        .tokens
        .get(token)
        .and_then(|username| inner.users.get(username))
        .map(|user| {
            let mut profile = user.clone();
            profile.remove("password");
            profile
        });

    match profile {
        Some(_) if inner.malformed_profile => (StatusCode::OK, Json(json!({"profile": null}))),
        Some(profile) => (StatusCode::OK, Json(json!({"user": profile}))),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid token"})),
        ),
    }
}
