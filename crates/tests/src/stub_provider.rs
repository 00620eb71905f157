//! In-process stand-in for the identity provider's auth API.
//!
//! Runs on its own thread and runtime so it outlives the per-test Tokio
//! runtimes. Only [`LIVE_REFRESH_TOKEN`] can be exchanged; any other refresh
//! token gets a 503, which the middleware treats as "provider unavailable".

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::common;

/// The one refresh token the stub accepts.
pub const LIVE_REFRESH_TOKEN: &str = "rt-live";

static LOGGED_OUT: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Bearer tokens the stub has received on `/logout`.
pub fn logged_out_tokens() -> Vec<String> {
    LOGGED_OUT
        .lock()
        .map(|tokens| tokens.clone())
        .unwrap_or_default()
}

/// Start the stub on an ephemeral port and return its base URL.
pub fn spawn() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub provider");
    listener
        .set_nonblocking(true)
        .expect("Failed to configure stub provider socket");
    let addr = listener.local_addr().expect("Stub provider has no address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build stub provider runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("Failed to adopt stub socket");
            axum::serve(listener, router())
                .await
                .expect("Stub provider stopped");
        });
    });

    format!("http://{addr}")
}

fn router() -> Router {
    Router::new()
        .route("/token", post(token))
        .route("/logout", post(logout))
}

// Connections are closed after every response so the shared HTTP client
// never reuses a socket across test runtimes.
fn closing(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONNECTION, "close")], Json(body)).into_response()
}

async fn token(Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>) -> Response {
    let is_refresh = query.get("grant_type").map(String::as_str) == Some("refresh_token");
    if !is_refresh || body["refresh_token"] != LIVE_REFRESH_TOKEN {
        return closing(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "msg": "temporarily unavailable" }),
        );
    }

    let claims = common::claims(Duration::hours(1));
    let access_token = common::mint(&claims, common::TEST_JWT_SECRET);
    closing(
        StatusCode::OK,
        json!({
            "access_token": access_token,
            "refresh_token": "rt-rotated",
            "expires_in": 3600,
            "user": { "id": claims.sub, "email": claims.email },
        }),
    )
}

async fn logout(headers: HeaderMap) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    match bearer {
        Some(token) => {
            if let Ok(mut tokens) = LOGGED_OUT.lock() {
                tokens.push(token);
            }
            (StatusCode::NO_CONTENT, [(header::CONNECTION, "close")]).into_response()
        }
        None => closing(StatusCode::UNAUTHORIZED, json!({ "msg": "missing token" })),
    }
}
