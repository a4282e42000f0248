//! Deployment configuration
//!
//! A single JSON file per deployment target:
//! 1. Environment variables (GIT_REMOTE_SYNC_*) override connection values
//! 2. The config file supplies everything else
//!
//! The file is also the persisted record of the last synchronized revision.

mod loader;
mod types;

pub use loader::{
    with_env_overrides, write_synced_revision, ConfigWarning, ENV_FTP_HOST, ENV_FTP_PASSWORD,
};
pub use types::{DeploymentConfig, RemoteConfig, RepoConfig, DEFAULT_FTP_PORT};
