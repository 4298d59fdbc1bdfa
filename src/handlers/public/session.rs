use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{issue_session, removal_cookie, session_cookie};
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/login - Check credentials and start a session
///
/// Expected Input:
/// ```json
/// { "username": "john_doe", "password": "password123" }
/// ```
///
/// On success responds `{ "id": "<user uuid>" }` and sets the session cookie
/// (HttpOnly, Secure, SameSite=Strict, one week). Unknown username is 404,
/// wrong password is 401.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => (u, p),
        _ => return Err(ApiError::bad_request("Username and password are required")),
    };

    let user = issue_session(state.store.as_ref(), username.trim(), &password).await?;

    Ok(ApiResponse::success(json!({ "id": user.id }))
        .with_cookie(session_cookie(&config::config().security, user.id)))
}

/// POST /api/logout - Drop the session cookie
pub async fn logout() -> ApiResponse<Value> {
    ApiResponse::success(json!({ "message": "Logged out" })).with_cookie(removal_cookie(&config::config().security))
}
