//! git-remote-sync - incremental deployment of a git repository over FTP
//!
//! Packages the files that changed between two revisions into a numbered
//! upload package, then replays that package on a remote server, creating
//! directories as needed. The last synchronized revision is kept in the
//! deployment config so the next run only picks up newer changes.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;

// Re-exports for convenience
pub use application::{
    PackageBuilder, PackageOutcome, PackageSummary, RemoteDeployer, RevisionRequest, RunReport,
    SyncPipeline, UploadOutcome, UploadReport,
};
pub use config::{DeploymentConfig, RemoteConfig, RepoConfig};
pub use domain::entities::Manifest;
pub use domain::value_objects::TargetPath;
pub use error::{SyncError, SyncResult};
pub use infrastructure::{FtpConnector, GitCli, JsonConfigRepository, JsonManifestRepository};

/// Package directory used when none is given
pub const DEFAULT_PACKAGE_DIR: &str = "upload-package";
