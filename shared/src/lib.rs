pub mod types;
pub mod config;
pub mod error;
pub mod backend;
pub mod supabase;
pub mod users;

use backend::UserBackend;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub backend: Arc<dyn UserBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn UserBackend>) -> Arc<Self> {
        Arc::new(Self { backend })
    }
}
