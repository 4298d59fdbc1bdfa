use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewNote, NewUser, Note, NoteChanges, User};

/// Persistence seam for users and notes.
///
/// Every method is a single-document operation; there is no cross-call
/// transaction. Owner-filtered note writes return `None`/`false` when no row
/// matched, which callers treat as "not found".
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn update_username(&self, id: Uuid, username: &str) -> Result<Option<User>, DatabaseError>;
    /// Removes the user and every note it owns
    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError>;
    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError>;
    async fn count_notes_by_owner(&self, owner: Uuid) -> Result<u64, DatabaseError>;
    /// Notes owned by `owner` in creation order, `skip` rows in, at most `limit` rows
    async fn list_notes_by_owner(&self, owner: Uuid, skip: u64, limit: u64) -> Result<Vec<Note>, DatabaseError>;
    async fn update_note(&self, id: Uuid, owner: Uuid, changes: NoteChanges) -> Result<Option<Note>, DatabaseError>;
    async fn delete_note(&self, id: Uuid, owner: Uuid) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
