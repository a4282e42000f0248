//! Configuration loading and persistence

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{atomic_write, to_pretty_json};

use super::types::DeploymentConfig;

/// Overrides `ftp.password` so it can stay out of the config file
pub const ENV_FTP_PASSWORD: &str = "GIT_REMOTE_SYNC_FTP_PASSWORD";
/// Overrides `ftp.host`
pub const ENV_FTP_HOST: &str = "GIT_REMOTE_SYNC_FTP_HOST";

const REVISION_KEY: &str = "lastSyncedRevision";
const LEGACY_REVISION_KEYS: &[&str] = &["earlier_hash", "package_hash"];

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key, e.g. `ftp.passive`
    pub key: String,
    pub file: PathBuf,
}

/// Load configuration and collect non-fatal warnings (unknown keys).
///
/// Relative `repo.path` values are resolved against the config file's
/// directory, environment overrides are applied, then required fields are
/// validated.
pub fn load_with_warnings(path: &Path) -> SyncResult<(DeploymentConfig, Vec<ConfigWarning>)> {
    if !path.is_file() {
        return Err(SyncError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(&content);
    let config: DeploymentConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e.to_string()))?;
    deserializer
        .end()
        .map_err(|e| invalid(path, e.to_string()))?;

    let config = with_env_overrides(resolve_repo_path(normalize(config), path));
    config.validate(path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (GIT_REMOTE_SYNC_* prefix)
pub fn with_env_overrides(config: DeploymentConfig) -> DeploymentConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: DeploymentConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> DeploymentConfig {
    if let Some(password) = get_env(ENV_FTP_PASSWORD) {
        config.ftp.password = password;
    }

    if let Some(host) = get_env(ENV_FTP_HOST).filter(|h| !h.trim().is_empty()) {
        config.ftp.host = host.trim().to_string();
    }

    config
}

/// Persist `revision` as `repo.lastSyncedRevision`.
///
/// Edits the stored JSON in place so unknown keys, key order and values that
/// came from environment overrides are left exactly as they are on disk.
/// Legacy revision keys are replaced by the current one.
pub fn write_synced_revision(path: &Path, revision: &str) -> SyncResult<()> {
    let content = fs::read_to_string(path)?;
    let mut document: Value =
        serde_json::from_str(&content).map_err(|e| invalid(path, e.to_string()))?;

    let repo = document
        .get_mut("repo")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| invalid(path, "missing 'repo' section".to_string()))?;

    repo.retain(|key, _| !LEGACY_REVISION_KEYS.contains(&key.as_str()));
    repo.insert(
        REVISION_KEY.to_string(),
        Value::String(revision.to_string()),
    );

    atomic_write(path, to_pretty_json(&document)?.as_bytes())?;
    Ok(())
}

fn normalize(mut config: DeploymentConfig) -> DeploymentConfig {
    config.repo.last_synced_revision = config
        .repo
        .last_synced_revision
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    config.ftp.host = config.ftp.host.trim().to_string();
    config
}

fn resolve_repo_path(mut config: DeploymentConfig, config_path: &Path) -> DeploymentConfig {
    if config.repo.path.is_relative() && !config.repo.path.as_os_str().is_empty() {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.repo.path = parent.join(&config.repo.path);
        }
    }
    config
}

fn invalid(path: &Path, message: String) -> SyncError {
    SyncError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    }
}
