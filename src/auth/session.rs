//! Session issuance and resolution.
//!
//! The session token is the user's id carried in a cookie. Nothing is kept
//! server-side: every request resolves the token against the store again.

use uuid::Uuid;

use crate::database::models::User;
use crate::database::RecordStore;
use crate::error::ApiError;

use super::{verify_password, AuthError};

/// Authenticated caller, resolved from the session cookie
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
        }
    }
}

/// Check credentials and return the user whose id becomes the session token
pub async fn issue_session(store: &dyn RecordStore, username: &str, password: &str) -> Result<User, AuthError> {
    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if !verify_password(password.to_string(), user.password_hash.clone()).await? {
        tracing::warn!("Login failed: bad password for '{}'", username);
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!("Session issued for user {}", user.id);
    Ok(user)
}

/// Resolve a session token to its user.
///
/// Missing token is Unauthorized, a token that is not an id is BadRequest,
/// and an id with no user behind it is NotFound.
pub async fn resolve_session(store: &dyn RecordStore, token: Option<&str>) -> Result<User, ApiError> {
    let token = token.ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let user_id = Uuid::parse_str(token).map_err(|_| {
        tracing::warn!("Rejected malformed session token");
        ApiError::bad_request("Invalid or missing userId")
    })?;

    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}
