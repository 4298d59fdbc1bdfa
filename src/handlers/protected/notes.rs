use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::SessionUser;
use crate::config;
use crate::database::models::{Note, NoteChanges};
use crate::middleware::{ApiResponse, ApiResult};
use crate::pagination::parse_positive;
use crate::services::{parse_note_id, NotePage};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub note_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub note_id: Option<String>,
}

/// GET /api/notes?page=&limit= - one page of the caller's notes
///
/// Responds `{ "notes": [...], "totalPages": n, "currentPage": page }`.
/// A page past the end is an empty list, not an error.
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<NotePage> {
    let api = &config::config().api;
    let page = parse_positive("page", query.page.as_deref(), 1)?;
    let limit = parse_positive("limit", query.limit.as_deref(), api.default_page_limit)?.min(api.max_page_limit);

    Ok(ApiResponse::success(state.notes.list(&session, page, limit).await?))
}

/// POST /api/notes - create a note owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let note = state.notes.create(&session, payload.title, payload.description).await?;
    Ok(ApiResponse::created(json!({ "message": "Note created", "note": note })))
}

/// GET /api/notes/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<Note> {
    let id = parse_note_id(Some(&id))?;
    Ok(ApiResponse::success(state.notes.get(&session, id).await?))
}

/// PATCH /api/notes - body `{ "noteId", "title"?, "description"? }`
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let id = parse_note_id(payload.note_id.as_deref())?;
    let changes = NoteChanges {
        title: payload.title,
        description: payload.description,
    };

    let note = state.notes.update(&session, id, changes).await?;
    Ok(ApiResponse::success(json!({ "message": "Note updated", "note": note })))
}

/// DELETE /api/notes?noteId=
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Value> {
    let id = parse_note_id(query.note_id.as_deref())?;
    state.notes.delete(&session, id).await?;
    Ok(ApiResponse::success(json!({ "message": "Note deleted successfully" })))
}
