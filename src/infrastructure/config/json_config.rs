//! JSON-file configuration repository implementation.

use std::path::{Path, PathBuf};

use crate::config::{write_synced_revision, ConfigWarning, DeploymentConfig};
use crate::domain::ports::ConfigRepository;
use crate::error::SyncResult;

/// Deployment config stored in a single JSON file.
///
/// Delegates to the `config` module for parsing and saving, providing a
/// trait-based abstraction for dependency injection.
#[derive(Debug, Clone)]
pub struct JsonConfigRepository {
    path: PathBuf,
}

impl JsonConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> SyncResult<(DeploymentConfig, Vec<ConfigWarning>)> {
        DeploymentConfig::load_with_warnings(&self.path)
    }

    fn record_synced_revision(&self, revision: &str) -> SyncResult<()> {
        write_synced_revision(&self.path, revision)?;
        tracing::info!(path = %self.path.display(), %revision, "recorded synced revision");
        Ok(())
    }
}
