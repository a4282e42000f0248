//! Version control port - changed paths, revision resolution and file content
//!
//! The git CLI implementation lives in `infrastructure::vcs`. Tests use
//! in-memory repositories.

use std::path::Path;

use crate::error::SyncResult;

/// Read-only access to a repository's history.
pub trait VersionControl {
    /// Repository-relative paths that differ between two revisions, in the
    /// order the version control system reports them.
    ///
    /// Fails with `SyncError::VcsInvocation` when either revision is unknown.
    fn changed_files(&self, repo: &Path, from: &str, to: &str) -> SyncResult<Vec<String>>;

    /// Resolve an alias such as `HEAD` or a branch name to a canonical id.
    fn resolve_revision(&self, repo: &Path, alias: &str) -> SyncResult<String>;

    /// Content of `path` as of `revision`.
    ///
    /// Returns `Ok(None)` when the path does not exist at that revision
    /// (deleted within the range). Only failures to run the tool are errors.
    fn show_file(&self, repo: &Path, revision: &str, path: &str) -> SyncResult<Option<Vec<u8>>>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn changed_files(&self, repo: &Path, from: &str, to: &str) -> SyncResult<Vec<String>> {
        (**self).changed_files(repo, from, to)
    }

    fn resolve_revision(&self, repo: &Path, alias: &str) -> SyncResult<String> {
        (**self).resolve_revision(repo, alias)
    }

    fn show_file(&self, repo: &Path, revision: &str, path: &str) -> SyncResult<Option<Vec<u8>>> {
        (**self).show_file(repo, revision, path)
    }
}
