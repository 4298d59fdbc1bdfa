use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Registration;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// POST /api/users - Register a new account
///
/// Expected Input:
/// ```json
/// {
///   "name": "John Doe",
///   "email": "john@example.com",
///   "username": "johndoe",
///   "password": "password123"
/// }
/// ```
///
/// All four fields are required. The password is stored hashed and is never
/// returned.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let user = state.users.register(payload.into()).await?;
    Ok(ApiResponse::created(json!({ "message": "User is created", "user": user })))
}

/// GET /api/users - List registered users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users.list().await?))
}

/// GET /api/users/check-username?username= - `{ "available": bool }`
pub async fn check_username(State(state): State<AppState>, Query(query): Query<UsernameQuery>) -> ApiResult<Value> {
    let username = query
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("'username' query parameter is required"))?;

    let available = state.users.username_available(&username).await?;
    Ok(ApiResponse::success(json!({ "available": available })))
}
