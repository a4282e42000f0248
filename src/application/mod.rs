//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PackageBuilder` - Diff two revisions and write an upload package
//! - `RemoteDeployer` - Upload a package over one remote session
//! - `SyncPipeline` - Package, confirm, upload, record the synced revision

pub mod package;
pub mod pipeline;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use package::{PackageBuilder, PackageOutcome};
pub use pipeline::{PackageSummary, RevisionRequest, RunReport, SyncPipeline, UploadOutcome};
pub use upload::{RemoteDeployer, UploadReport, UploadedEntry};
