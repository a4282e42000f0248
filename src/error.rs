//! Error types for git-remote-sync
//!
//! Library code returns `SyncError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for sync operations
///
/// Every variant is fatal to the current run. A changed file that is absent at
/// the target revision is not an error: the package builder skips it and emits
/// a warning event instead.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A git command exited non-zero or could not be started
    #[error("git command failed: `{command}`: {stderr}")]
    VcsInvocation { command: String, stderr: String },

    /// FTP session setup or login failed
    #[error("could not connect to {host}: {message}")]
    Connection { host: String, message: String },

    /// Remote directory creation failed for a reason other than "already exists"
    #[error("could not create remote directory '{path}': {message}")]
    RemoteDirectory { path: String, message: String },

    /// A single file upload failed; earlier uploads in the run are kept
    #[error("upload of #{number} ({path}) failed after {uploaded} file(s) were uploaded: {message}")]
    Transfer {
        number: u32,
        path: String,
        uploaded: usize,
        message: String,
    },

    /// Config file does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config file could not be parsed or is missing required fields
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Manifest file could not be parsed or violates the numbering rules
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// Package directory or its manifest is missing
    #[error("no upload package found at {path} - run the packer first")]
    PackageNotFound { path: PathBuf },

    /// A numbered file listed in the manifest is missing from the package
    #[error("package entry #{number} is missing: {path}")]
    PackageEntryMissing { number: u32, path: PathBuf },

    /// The package on disk was not built from the revision recorded in the config
    #[error("package was built from {manifest} but the config records {config}")]
    ManifestMismatch { manifest: String, config: String },

    /// A changed path cannot be used as a remote target path
    #[error("invalid target path '{path}': {reason}")]
    InvalidTargetPath { path: String, reason: String },

    /// No earlier revision was given and the config has none recorded
    #[error("earlier revision is required (none given and none recorded in the config)")]
    MissingRevision,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
