use std::sync::Arc;

use crate::adapters::FilesystemProjectStore;
use crate::app::config::ServerConfig;
use crate::app::documents::DocumentRenderer;
use crate::domain::AppError;
use crate::ports::ProjectStore;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` when bundles are not persisted.
    pub store: Option<Arc<dyn ProjectStore>>,
    pub renderer: Arc<DocumentRenderer>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Option<Arc<dyn ProjectStore>>) -> Result<Self, AppError> {
        Ok(Self {
            config: Arc::new(config),
            store,
            renderer: Arc::new(DocumentRenderer::new()?),
        })
    }

    /// State with a filesystem store under `config.home` when persistence is on.
    pub fn from_config(config: ServerConfig) -> Result<Self, AppError> {
        let store = config.persist.then(|| {
            Arc::new(FilesystemProjectStore::new(config.home.clone())) as Arc<dyn ProjectStore>
        });
        Self::new(config, store)
    }
}
