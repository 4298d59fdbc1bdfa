use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{removal_cookie, SessionUser};
use crate::config;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    pub new_username: Option<String>,
}

/// GET /api/userInfo - who the session belongs to
pub async fn user_info(Extension(session): Extension<SessionUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "username": session.username,
        "name": session.name,
    })))
}

/// PATCH /api/users - rename the session user
pub async fn change_username(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    payload: Result<Json<ChangeUsernameRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let user = state.users.change_username(&session, payload.new_username).await?;
    Ok(ApiResponse::success(json!({ "message": "Username updated successfully", "user": user })))
}

/// DELETE /api/users - delete the session user and all of its notes
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Value> {
    state.users.delete_account(&session).await?;
    Ok(ApiResponse::success(json!({ "message": "User deleted successfully" }))
        .with_cookie(removal_cookie(&config::config().security)))
}
