//! Live backends for client tests.
//!
//! The hero service talks real HTTP, so these helpers serve a router on an
//! ephemeral port and record every request that reaches it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::Method,
    middleware::{self, Next},
    response::Response,
    Router,
};
use hero_tour::api::create_router;
use hero_tour::config::ClientConfig;
use hero_tour::db::Database;
use hero_tour::messages::MessageLog;
use hero_tour::service::HeroService;

/// One request as the backend received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Recorded>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn with_method(&self, method: Method) -> Vec<Recorded> {
        self.all().into_iter().filter(|r| r.method == method).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    log.0.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        content_type: parts
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    next.run(Request::from_parts(parts, Body::from(body))).await
}

/// A running backend plus handles to inspect it.
pub struct Backend {
    pub base_url: String,
    pub requests: RequestLog,
    pub db: Database,
}

impl Backend {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(&self.base_url)
    }

    /// A service pointed at this backend, with a fresh message log.
    pub fn service(&self) -> (HeroService, MessageLog) {
        let messages = MessageLog::new();
        (HeroService::new(&self.config(), messages.clone()), messages)
    }
}

/// Serve `router` on an ephemeral port, recording requests.
pub async fn serve(router: Router) -> (String, RequestLog) {
    let requests = RequestLog::default();
    let app = router.layer(middleware::from_fn_with_state(requests.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    (format!("http://{addr}"), requests)
}

/// The real hero backend over an empty in-memory database.
pub async fn empty_backend() -> Backend {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let (base_url, requests) = serve(create_router(db.clone())).await;
    Backend {
        base_url,
        requests,
        db,
    }
}

/// The real hero backend seeded with the mock roster.
pub async fn seeded_backend() -> Backend {
    let backend = empty_backend().await;
    backend.db.seed_mock_heroes().expect("Failed to seed");
    backend
}

/// A base URL where nothing is listening.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn unreachable_service() -> (HeroService, MessageLog) {
    let messages = MessageLog::new();
    let config = ClientConfig::with_base_url(unreachable_url());
    (HeroService::new(&config, messages.clone()), messages)
}
