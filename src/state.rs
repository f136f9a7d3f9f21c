//! Application state for shutterbox.
//!
//! Contains the shared state that is passed to all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::services::{AssetStore, DiskAssetStore};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend for uploaded assets.
    pub store: Arc<dyn AssetStore>,
}

impl AppState {
    /// Create a new application state, initializing the storage backend.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let store = DiskAssetStore::new(PathBuf::from(&config.storage.uploads_path));
        store.ensure_dir().await?;

        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Build a state around an existing store. Used by tests to point the
    /// handlers at an isolated directory.
    pub fn with_store(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }
}
