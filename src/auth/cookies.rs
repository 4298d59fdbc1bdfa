use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};
use uuid::Uuid;

use crate::config::SecurityConfig;

fn base_cookie(settings: &SecurityConfig, value: String) -> Cookie<'static> {
    Cookie::build((settings.session_cookie.clone(), value))
        .path("/")
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Strict)
        .build()
}

/// Cookie carrying the session token (the user's id)
pub fn session_cookie(settings: &SecurityConfig, user_id: Uuid) -> Cookie<'static> {
    let mut cookie = base_cookie(settings, user_id.to_string());
    cookie.set_max_age(time::Duration::seconds(settings.session_max_age_secs));
    cookie
}

/// Expired cookie that makes the client drop its session
pub fn removal_cookie(settings: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(settings, String::new());
    cookie.make_removal();
    cookie
}

/// Session cookie value from the request, `None` when absent or empty
pub fn read_session_token(headers: &HeaderMap, settings: &SecurityConfig) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw).filter_map(Result::ok))
        .find(|c| c.name() == settings.session_cookie)
        .map(|c| c.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::HeaderValue;

    fn settings() -> SecurityConfig {
        AppConfig::from_env().security
    }

    #[test]
    fn session_cookie_attributes() {
        let settings = settings();
        let id = Uuid::new_v4();
        let rendered = session_cookie(&settings, id).to_string();

        assert!(rendered.starts_with(&format!("{}={}", settings.session_cookie, id)));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains(&format!("Max-Age={}", settings.session_max_age_secs)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let rendered = removal_cookie(&settings()).to_string();
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn reads_token_among_other_cookies() {
        let settings = settings();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}=abc123", settings.session_cookie)).unwrap(),
        );
        assert_eq!(read_session_token(&headers, &settings).as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_or_missing_token_is_none() {
        let settings = settings();
        let mut headers = HeaderMap::new();
        assert_eq!(read_session_token(&headers, &settings), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}=", settings.session_cookie)).unwrap(),
        );
        assert_eq!(read_session_token(&headers, &settings), None);
    }
}
