use std::sync::Arc;

use crate::database::RecordStore;
use crate::services::{NoteService, UserService};

/// Shared per-process handles; no mutable state lives here
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub notes: NoteService,
    pub users: UserService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            notes: NoteService::new(store.clone()),
            users: UserService::new(store.clone()),
            store,
        }
    }
}
