//! Page shells for the browser client.
//!
//! Rendering happens client-side; these exist so the route guard has real
//! targets and each view gets a mount point.

use axum::response::{Html, IntoResponse, Redirect};

use crate::middleware::LANDING_PATH;

fn shell(view: &str, title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body><div id=\"app\" data-view=\"{}\"></div></body>\n</html>\n",
        title, view
    ))
}

pub async fn root() -> impl IntoResponse {
    Redirect::temporary(LANDING_PATH)
}

pub async fn home() -> Html<String> {
    shell("home", "Home")
}

pub async fn notes() -> Html<String> {
    shell("notes", "Notes")
}

pub async fn note_detail() -> Html<String> {
    shell("note", "Note")
}

pub async fn login() -> Html<String> {
    shell("login", "Log in")
}

pub async fn register() -> Html<String> {
    shell("register", "Register")
}
