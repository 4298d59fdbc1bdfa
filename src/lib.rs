pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Build the full router: API, page shells, and global layers
pub fn app(state: AppState) -> Router {
    let settings = config::config();

    let router = Router::new()
        .route("/health", get(handlers::public::system::health))
        .merge(api_routes(&state))
        .merge(page_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    if settings.security.enable_cors {
        router.layer(cors_layer(&settings.security.cors_origins))
    } else {
        router
    }
}

fn api_routes(state: &AppState) -> Router<AppState> {
    use handlers::protected::{account, notes};
    use handlers::public::{session, system, users};

    let session_layer = || from_fn_with_state(state.clone(), middleware::require_session);

    Router::new()
        .route("/api", get(system::index))
        .route("/api/ping", get(system::ping))
        .route("/api/echo", get(system::echo))
        // Session management
        .route("/api/login", post(session::login))
        .route("/api/logout", post(session::logout))
        // Users: listing and registration are public, account changes need a session
        .route(
            "/api/users",
            get(users::list).post(users::register).merge(
                patch(account::change_username)
                    .delete(account::delete_account)
                    .route_layer(session_layer()),
            ),
        )
        .route("/api/users/check-username", get(users::check_username))
        .route("/api/userInfo", get(account::user_info).route_layer(session_layer()))
        // Notes
        .route(
            "/api/notes",
            get(notes::list)
                .post(notes::create)
                .patch(notes::update)
                .delete(notes::delete)
                .route_layer(session_layer()),
        )
        .route("/api/notes/:id", get(notes::get).route_layer(session_layer()))
}

fn page_routes() -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/", get(pages::root))
        .route("/home", get(pages::home))
        .route("/notes", get(pages::notes))
        .route("/notes/*path", get(pages::note_detail))
        .route(middleware::LOGIN_PATH, get(pages::login))
        .route(middleware::REGISTER_PATH, get(pages::register))
        .route_layer(from_fn(middleware::route_guard))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    // Credentials are required for the session cookie, so origins stay explicit
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::new(Arc::new(MemoryStore::new())))
    }

    fn cookie_header(value: &str) -> String {
        format!("{}={}", config::config().security.session_cookie, value)
    }

    #[tokio::test]
    async fn guard_redirects_anonymous_page_requests() {
        let response = test_app()
            .oneshot(Request::get("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn guard_only_checks_cookie_presence() {
        let response = test_app()
            .oneshot(
                Request::get("/home")
                    .header(header::COOKIE, cookie_header("forged"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = test_app()
            .oneshot(
                Request::get("/login")
                    .header(header::COOKIE, cookie_header("forged"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/home");
    }

    #[tokio::test]
    async fn forged_cookie_is_rejected_by_api() {
        let forged = uuid::Uuid::new_v4().to_string();
        let response = test_app()
            .oneshot(
                Request::get("/api/notes")
                    .header(header::COOKIE, cookie_header(&forged))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_without_cookie_is_unauthorized() {
        let response = test_app()
            .oneshot(Request::get("/api/userInfo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_user_routes_skip_session() {
        let response = test_app()
            .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = test_app()
            .oneshot(Request::delete("/api/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
