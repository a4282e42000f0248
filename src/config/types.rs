//! Configuration type definitions

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

use super::loader::{self, ConfigWarning};

pub const DEFAULT_FTP_PORT: u16 = 21;

/// Persisted deployment config: where the repository lives, how to reach the
/// remote, and which revision was last packaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub repo: RepoConfig,
    pub ftp: RemoteConfig,
}

/// Repository section (`repo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRepoConfig")]
pub struct RepoConfig {
    pub path: PathBuf,

    /// Absent on the first run. Older configs used `earlier_hash` / `package_hash`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_revision: Option<String>,
}

/// `repo` as found on disk. Older configs can carry both legacy keys: the
/// packer wrote `package_hash`, the full pipeline `earlier_hash`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRepoConfig {
    path: PathBuf,

    #[serde(default)]
    last_synced_revision: Option<String>,

    #[serde(default, rename = "package_hash")]
    package_hash: Option<String>,

    #[serde(default, rename = "earlier_hash")]
    earlier_hash: Option<String>,
}

impl From<StoredRepoConfig> for RepoConfig {
    fn from(stored: StoredRepoConfig) -> Self {
        // lastSyncedRevision > package_hash > earlier_hash; blanks do not count.
        let last_synced_revision = [
            stored.last_synced_revision,
            stored.package_hash,
            stored.earlier_hash,
        ]
        .into_iter()
        .flatten()
        .find(|r| !r.trim().is_empty());

        Self {
            path: stored.path,
            last_synced_revision,
        }
    }
}

/// Remote section (`ftp`)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub username: String,

    pub password: String,

    #[serde(alias = "target_dir")]
    pub target_dir: String,
}

fn default_port() -> u16 {
    DEFAULT_FTP_PORT
}

impl RemoteConfig {
    /// `host:port`, as passed to the socket layer
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keep the password out of logs and error output.
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("target_dir", &self.target_dir)
            .finish()
    }
}

impl DeploymentConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> SyncResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> SyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Check required fields are present and non-blank.
    pub fn validate(&self, file: &Path) -> SyncResult<()> {
        let mut missing = Vec::new();
        if self.repo.path.as_os_str().is_empty() {
            missing.push("repo.path");
        }
        let required = [
            ("ftp.host", &self.ftp.host),
            ("ftp.username", &self.ftp.username),
            ("ftp.password", &self.ftp.password),
            ("ftp.targetDir", &self.ftp.target_dir),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                missing.push(key);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SyncError::InvalidConfig {
                file: file.to_path_buf(),
                message: format!("missing required value(s): {}", missing.join(", ")),
            })
        }
    }
}
