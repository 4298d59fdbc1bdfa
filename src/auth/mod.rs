pub mod cookies;
pub mod password;
pub mod session;

use thiserror::Error;

use crate::database::DatabaseError;

pub use cookies::{read_session_token, removal_cookie, session_cookie};
pub use password::{hash_password, verify_password};
pub use session::{issue_session, resolve_session, SessionUser};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
