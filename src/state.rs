//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::database::ProductStore;

/// Constructed once at startup; cloning is cheap and shares the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    admin_api_key: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, admin_api_key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            admin_api_key: admin_api_key.into(),
        }
    }

    pub fn admin_api_key(&self) -> &str {
        &self.admin_api_key
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
