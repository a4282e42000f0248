//! Config repository port - abstracts deployment config persistence.

use crate::config::{ConfigWarning, DeploymentConfig};
use crate::error::SyncResult;

/// Repository trait for the deployment config.
///
/// The pipeline keeps the loaded config as a value and only calls back into
/// the repository at its checkpoints (after packaging, after upload).
pub trait ConfigRepository {
    /// Load the config, with warnings about unknown keys.
    fn load(&self) -> SyncResult<(DeploymentConfig, Vec<ConfigWarning>)>;

    /// Persist `revision` as the last synchronized revision.
    ///
    /// Only the revision is written; every other setting in the stored config
    /// is preserved as-is.
    fn record_synced_revision(&self, revision: &str) -> SyncResult<()>;
}

impl<T: ConfigRepository + ?Sized> ConfigRepository for &T {
    fn load(&self) -> SyncResult<(DeploymentConfig, Vec<ConfigWarning>)> {
        (**self).load()
    }

    fn record_synced_revision(&self, revision: &str) -> SyncResult<()> {
        (**self).record_synced_revision(revision)
    }
}
