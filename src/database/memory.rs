use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewNote, NewUser, Note, NoteChanges, User};
use crate::database::store::RecordStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    notes: Vec<Note>,
}

/// In-process record store. Rows keep insertion order, which doubles as
/// creation order for note listings.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict("username already exists".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn update_username(&self, id: Uuid, username: &str) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == username && u.id != id) {
            return Err(DatabaseError::Conflict("username already exists".to_string()));
        }

        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.username = username.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.notes.retain(|n| n.owner != id);
        Ok(true)
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == note.owner) {
            return Err(DatabaseError::MissingReference(format!("owner {} does not exist", note.owner)));
        }

        let now = Utc::now();
        let created = Note {
            id: Uuid::new_v4(),
            title: note.title,
            description: note.description,
            owner: note.owner,
            created_at: now,
            updated_at: now,
        };
        tables.notes.push(created.clone());
        Ok(created)
    }

    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().find(|n| n.id == id).cloned())
    }

    async fn count_notes_by_owner(&self, owner: Uuid) -> Result<u64, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().filter(|n| n.owner == owner).count() as u64)
    }

    async fn list_notes_by_owner(&self, owner: Uuid, skip: u64, limit: u64) -> Result<Vec<Note>, DatabaseError> {
        let tables = self.tables.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(tables
            .notes
            .iter()
            .filter(|n| n.owner == owner)
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: Uuid, owner: Uuid, changes: NoteChanges) -> Result<Option<Note>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .notes
            .iter_mut()
            .find(|n| n.id == id && n.owner == owner)
            .map(|note| {
                if let Some(title) = changes.title {
                    note.title = title;
                }
                if let Some(description) = changes.description {
                    note.description = Some(description);
                }
                note.updated_at = Utc::now();
                note.clone()
            }))
    }

    async fn delete_note(&self, id: Uuid, owner: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables.notes.retain(|n| !(n.id == id && n.owner == owner));
        Ok(tables.notes.len() != before)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
