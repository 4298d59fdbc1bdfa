#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{header, redirect, Client, StatusCode};
use serde_json::{json, Value};

use notes_api::config;
use notes_api::database::MemoryStore;
use notes_api::{app, AppState};

pub const PASSWORD: &str = "password123";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve a fresh app backed by an empty in-memory store.
/// Redirects are not followed so route guard responses stay visible.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test port")?;
    let app = app(AppState::new(Arc::new(MemoryStore::new())));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .context("failed to build http client")?;

    Ok(TestServer { port, base_url, client })
}

/// `name=value` pair of the session cookie set on a response, if any
pub fn session_cookie_from(res: &reqwest::Response) -> Option<String> {
    let name = &config::config().security.session_cookie;
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub fn cookie_for(user_id: &str) -> String {
    format!("{}={}", config::config().security.session_cookie, user_id)
}

pub async fn register(server: &TestServer, username: &str) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/api/users"))
        .json(&json!({
            "name": format!("{} name", username),
            "email": format!("{}@example.com", username),
            "username": username,
            "password": PASSWORD,
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
    Ok(res.json::<Value>().await?["user"].clone())
}

/// Log in and return the `Cookie` header value for later requests
pub async fn login(server: &TestServer, username: &str) -> Result<String> {
    let res = server
        .client
        .post(server.url("/api/login"))
        .json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    session_cookie_from(&res).context("login response did not set a session cookie")
}

pub async fn register_and_login(server: &TestServer, username: &str) -> Result<String> {
    register(server, username).await?;
    login(server, username).await
}

pub async fn create_note(server: &TestServer, cookie: &str, title: &str) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/api/notes"))
        .header(header::COOKIE, cookie)
        .json(&json!({ "title": title, "description": format!("{} body", title) }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create note failed: {}", res.status());
    Ok(res.json::<Value>().await?["note"].clone())
}
