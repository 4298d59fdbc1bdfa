use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::SessionUser;
use crate::database::models::{NewNote, Note, NoteChanges};
use crate::database::{DatabaseError, RecordStore};
use crate::error::ApiError;
use crate::pagination::PageWindow;

const NOTE_NOT_FOUND: &str = "Note not found or does not belong to the user";

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// The one ownership rule every note operation goes through
pub fn authorize(session: &SessionUser, note: &Note) -> Access {
    if note.owner == session.id {
        Access::Allowed
    } else {
        Access::Denied
    }
}

/// Parse a note id from a request, rejecting anything that is not a UUID
pub fn parse_note_id(raw: Option<&str>) -> Result<Uuid, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid or missing noteId"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Note operations gated on the caller owning the note.
///
/// A note that exists but belongs to someone else is reported exactly like a
/// missing one.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn RecordStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, session: &SessionUser, page: u64, limit: u64) -> Result<NotePage, ApiError> {
        let total = self.store.count_notes_by_owner(session.id).await?;
        let window = PageWindow::compute(page, limit, total);

        let notes = if window.is_empty() {
            Vec::new()
        } else {
            self.store
                .list_notes_by_owner(session.id, window.skip, window.limit)
                .await?
        };

        Ok(NotePage {
            notes,
            total_pages: window.total_pages,
            current_page: window.page,
        })
    }

    pub async fn get(&self, session: &SessionUser, id: Uuid) -> Result<Note, ApiError> {
        self.owned_note(session, id).await
    }

    pub async fn create(
        &self,
        session: &SessionUser,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Note, ApiError> {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("title required"))?;

        let note = self
            .store
            .insert_note(NewNote {
                title,
                description,
                owner: session.id,
            })
            .await
            .map_err(|e| match e {
                // The session user was deleted after the session resolved
                DatabaseError::MissingReference(_) => ApiError::not_found("User not found"),
                other => other.into(),
            })?;

        tracing::debug!("Created note {} for user {}", note.id, session.id);
        Ok(note)
    }

    pub async fn update(&self, session: &SessionUser, id: Uuid, changes: NoteChanges) -> Result<Note, ApiError> {
        if matches!(&changes.title, Some(t) if t.trim().is_empty()) {
            return Err(ApiError::bad_request("title required"));
        }

        let current = self.owned_note(session, id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        // Owner-filtered write: a delete racing with this update surfaces as not found
        let note = self
            .store
            .update_note(id, session.id, changes)
            .await?
            .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;

        tracing::debug!("Updated note {} for user {}", note.id, session.id);
        Ok(note)
    }

    pub async fn delete(&self, session: &SessionUser, id: Uuid) -> Result<(), ApiError> {
        self.owned_note(session, id).await?;

        if !self.store.delete_note(id, session.id).await? {
            return Err(ApiError::not_found(NOTE_NOT_FOUND));
        }

        tracing::debug!("Deleted note {} for user {}", id, session.id);
        Ok(())
    }

    async fn owned_note(&self, session: &SessionUser, id: Uuid) -> Result<Note, ApiError> {
        let note = self
            .store
            .find_note(id)
            .await?
            .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;

        match authorize(session, &note) {
            Access::Allowed => Ok(note),
            Access::Denied => {
                tracing::debug!("User {} denied access to note {}", session.id, id);
                Err(ApiError::not_found(NOTE_NOT_FOUND))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::MemoryStore;
    use axum::http::StatusCode;

    async fn setup() -> (NoteService, Arc<MemoryStore>, SessionUser, SessionUser) {
        let store = Arc::new(MemoryStore::new());
        let mut sessions = Vec::new();
        for username in ["alice", "bob"] {
            let user = store
                .insert_user(NewUser {
                    name: username.into(),
                    email: format!("{}@example.com", username),
                    username: username.into(),
                    password_hash: "unused".into(),
                })
                .await
                .unwrap();
            sessions.push(SessionUser::from(user));
        }
        let bob = sessions.pop().unwrap();
        let alice = sessions.pop().unwrap();
        (NoteService::new(store.clone()), store, alice, bob)
    }

    #[test]
    fn parse_note_id_rejects_malformed() {
        assert!(parse_note_id(None).is_err());
        assert!(parse_note_id(Some("")).is_err());
        assert!(parse_note_id(Some("60f7b0d8a1e1f0b0c8c8c8c8")).is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_note_id(Some(&id.to_string())).unwrap(), id);
    }

    #[tokio::test]
    async fn owner_can_read_others_get_not_found() {
        let (notes, _, alice, bob) = setup().await;
        let note = notes.create(&alice, Some("Shopping List".into()), None).await.unwrap();

        assert_eq!(notes.get(&alice, note.id).await.unwrap(), note);

        let foreign = notes.get(&bob, note.id).await.unwrap_err();
        let missing = notes.get(&bob, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(foreign.message(), missing.message());
    }

    #[tokio::test]
    async fn create_without_title_does_not_touch_store() {
        let (notes, store, alice, _) = setup().await;
        for title in [None, Some(String::new()), Some("   ".to_string())] {
            let err = notes.create(&alice, title, Some("body".into())).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(store.count_notes_by_owner(alice.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_after_owner_deleted_is_not_found() {
        let (notes, store, alice, _) = setup().await;
        assert!(store.delete_user(alice.id).await.unwrap());

        let err = notes.create(&alice, Some("too late".into()), None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "User not found");
    }

    #[tokio::test]
    async fn update_overwrites_only_given_fields() {
        let (notes, _, alice, bob) = setup().await;
        let note = notes
            .create(&alice, Some("Shopping List".into()), Some("milk".into()))
            .await
            .unwrap();

        let updated = notes
            .update(&alice, note.id, NoteChanges { title: None, description: Some("eggs".into()) })
            .await
            .unwrap();
        assert_eq!(updated.title, "Shopping List");
        assert_eq!(updated.description.as_deref(), Some("eggs"));
        assert_eq!(updated.owner, alice.id);

        let err = notes
            .update(&bob, note.id, NoteChanges { title: Some("mine now".into()), description: None })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(notes.get(&alice, note.id).await.unwrap().title, "Shopping List");
    }

    #[tokio::test]
    async fn repeated_delete_is_not_found() {
        let (notes, _, alice, bob) = setup().await;
        let note = notes.create(&alice, Some("temp".into()), None).await.unwrap();

        assert_eq!(notes.delete(&bob, note.id).await.unwrap_err().status_code(), StatusCode::NOT_FOUND);
        notes.delete(&alice, note.id).await.unwrap();
        assert_eq!(notes.delete(&alice, note.id).await.unwrap_err().status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_pages_through_own_notes_only() {
        let (notes, _, alice, bob) = setup().await;
        for title in ["one", "two", "three"] {
            notes.create(&alice, Some(title.into()), None).await.unwrap();
        }
        notes.create(&bob, Some("bob's".into()), None).await.unwrap();

        let first = notes.list(&alice, 1, 1).await.unwrap();
        assert_eq!(first.notes.len(), 1);
        assert_eq!(first.notes[0].title, "one");
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.current_page, 1);

        let past_end = notes.list(&alice, 4, 1).await.unwrap();
        assert!(past_end.notes.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }
}
