//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::UsersApi;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UsersApi>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UsersApi>) -> Self {
        Self { users }
    }
}
