use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{read_session_token, resolve_session, SessionUser};
use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the session cookie to a user and inject `SessionUser` into the
/// request. Unlike the route guard this checks the user actually exists.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = read_session_token(request.headers(), &config::config().security);
    let user = resolve_session(state.store.as_ref(), token.as_deref()).await?;

    tracing::debug!("Session resolved for user {} on {}", user.id, request.uri().path());
    request.extensions_mut().insert(SessionUser::from(user));

    Ok(next.run(request).await)
}
