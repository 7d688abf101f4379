#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};

/// In-process stand-in for the simulation service.
pub struct MockService {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<String>,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockService {
    /// Serve `body` verbatim with `status` on `POST /api/simulate`.
    pub async fn spawn(status: u16, body: impl Into<String>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: Arc::new(body.into()),
            hits: Arc::clone(&hits),
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/api/simulate", post(simulate))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("mock address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock service");
        });
        Self {
            base_url: format!("http://{addr}"),
            hits,
            requests,
        }
    }

    pub async fn ok(output: Value) -> Self {
        Self::spawn(200, json!({ "output": output }).to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn simulate(
    State(state): State<MockState>,
    axum::Json(request): axum::Json<Value>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(request);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.as_str().to_owned(),
    )
        .into_response()
}

/// Output matching the reference Gulf of Mexico scenario.
pub fn gulf_output() -> Value {
    json!({
        "impact_location": { "lat": 29.1, "lon": -89.0, "elevation_m": 12.3 },
        "crater": { "diameter_km": 1.4 },
        "heliocentric_coordinates": {
            "current": [0.95, 0.21, -0.01],
            "future": [0.81, 0.55, 0.02]
        },
        "energy": { "megatons_tnt": 182.4, "risk_text": "Regional devastation" }
    })
}
