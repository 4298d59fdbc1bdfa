use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{hash_password, SessionUser};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, RecordStore};
use crate::error::ApiError;

const USERNAME_TAKEN: &str = "Username is already taken";

/// Registration fields as submitted; all four are required
#[derive(Debug, Default, Clone)]
pub struct Registration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn required(value: Option<String>, field: &str, errors: &mut HashMap<String, String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.insert(field.to_string(), "This field is required".to_string());
            String::new()
        }
    }
}

fn map_conflict(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::Conflict(_) => ApiError::conflict(USERNAME_TAKEN),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        let mut errors = HashMap::new();
        let name = required(registration.name, "name", &mut errors);
        let email = required(registration.email, "email", &mut errors);
        let username = required(registration.username, "username", &mut errors);
        let password = required(registration.password, "password", &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::validation_error("Missing required fields", Some(errors)));
        }

        let password_hash = hash_password(password).await?;
        let user = self
            .store
            .insert_user(NewUser {
                name,
                email,
                username: username.trim().to_string(),
                password_hash,
            })
            .await
            .map_err(map_conflict)?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Advisory check; uniqueness is finally decided by the insert
    pub async fn username_available(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.store.find_user_by_username(username.trim()).await?.is_none())
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.store.list_users().await?)
    }

    pub async fn change_username(&self, session: &SessionUser, new_username: Option<String>) -> Result<User, ApiError> {
        let new_username = new_username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::bad_request("New username is required"))?;

        let user = self
            .store
            .update_username(session.id, &new_username)
            .await
            .map_err(map_conflict)?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        tracing::info!("User {} renamed to {}", user.id, user.username);
        Ok(user)
    }

    pub async fn delete_account(&self, session: &SessionUser) -> Result<(), ApiError> {
        if !self.store.delete_user(session.id).await? {
            return Err(ApiError::not_found("User not found"));
        }
        tracing::info!("Deleted user {}", session.id);
        Ok(())
    }
}
