use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewNote, NewUser, Note, NoteChanges, User};
use crate::database::store::RecordStore;

const USER_COLUMNS: &str = "id, name, email, username, password_hash, created_at, updated_at";
const NOTE_COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

/// Postgres-backed record store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> Result<i64, DatabaseError> {
    i64::try_from(value).map_err(|_| DatabaseError::QueryError(format!("value {} out of range", value)))
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO users (id, name, email, username, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "username"))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn update_username(&self, id: Uuid, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET username = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "username"))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        // notes.owner_id cascades
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO notes (id, title, description, owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            NOTE_COLUMNS
        );

        // A concurrently deleted owner trips notes.owner_id REFERENCES users
        sqlx::query_as::<_, Note>(&sql)
            .bind(Uuid::new_v4())
            .bind(&note.title)
            .bind(&note.description)
            .bind(note.owner)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "note owner"))
    }

    async fn find_note(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        let sql = format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS);
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    async fn count_notes_by_owner(&self, owner: Uuid) -> Result<u64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE owner_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn list_notes_by_owner(&self, owner: Uuid, skip: u64, limit: u64) -> Result<Vec<Note>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM notes WHERE owner_id = $1 ORDER BY created_at, id LIMIT $2 OFFSET $3",
            NOTE_COLUMNS
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(owner)
            .bind(to_i64(limit)?)
            .bind(to_i64(skip)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    async fn update_note(&self, id: Uuid, owner: Uuid, changes: NoteChanges) -> Result<Option<Note>, DatabaseError> {
        let sql = format!(
            "UPDATE notes
             SET title = COALESCE($3, title),
                 description = COALESCE($4, description),
                 updated_at = now()
             WHERE id = $1 AND owner_id = $2
             RETURNING {}",
            NOTE_COLUMNS
        );
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(owner)
            .bind(changes.title)
            .bind(changes.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid, owner: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
