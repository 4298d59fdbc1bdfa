use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EchoQuery {
    pub msg: Option<String>,
}

/// GET /api - service index
pub async fn index() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Notes API",
        "version": version,
        "endpoints": {
            "session": "/api/login, /api/logout (public)",
            "users": "/api/users, /api/users/check-username (public); PATCH/DELETE /api/users (session)",
            "notes": "/api/notes[/:id] (session)",
            "user_info": "/api/userInfo (session)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - liveness plus store reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// GET /api/ping
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

/// GET /api/echo?msg=
pub async fn echo(Query(query): Query<EchoQuery>) -> Result<Json<Value>, ApiError> {
    let msg = query
        .msg
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request("'msg' query parameter is required"))?;
    Ok(Json(json!({ "message": msg })))
}
