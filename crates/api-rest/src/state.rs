use mib_core::{load_collection, CoreConfig, DirectoryState, DoctorRepository};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state for the REST API server
///
/// Holds the configuration, the Doctor Repository client, and the directory session. The
/// collection is fetched once in [`AppState::load`]; later list requests never hit the repository.
#[derive(Clone)]
pub struct AppState {
    pub(crate) cfg: Arc<CoreConfig>,
    pub(crate) repository: Arc<dyn DoctorRepository>,
    pub(crate) directory: Arc<RwLock<DirectoryState>>,
}

impl AppState {
    /// Creates the state and performs the initial collection fetch.
    ///
    /// A failed fetch is logged and the directory starts empty; the server still comes up.
    pub async fn load(cfg: Arc<CoreConfig>, repository: Arc<dyn DoctorRepository>) -> Self {
        let mut directory = DirectoryState::new(cfg.default_page_size());
        directory.load(load_collection(repository.as_ref()).await);

        Self {
            cfg,
            repository,
            directory: Arc::new(RwLock::new(directory)),
        }
    }

    pub fn cfg(&self) -> &CoreConfig {
        &self.cfg
    }
}

