use std::path::PathBuf;
use std::sync::Arc;

use gitvitae_core::store::Store;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }
}
