//! Package Use Case
//!
//! Turns the changes between two revisions into an upload package:
//!
//! 1. Ask version control which paths differ
//! 2. Recreate the package directory
//! 3. Write the content of each path at the newer revision as a numbered file
//! 4. Write the manifest mapping numbers to target paths
//!
//! Paths that do not exist at the newer revision (deleted in the range) are
//! skipped with a warning and do not consume a number.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::Manifest;
use crate::domain::ports::{DeployEvent, DeployEventSink, NoopEventSink, VersionControl};
use crate::domain::value_objects::TargetPath;
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::JsonManifestRepository;

/// Result of a packaging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub manifest: Manifest,
    /// Changed paths left out because they are absent at the newer revision
    pub skipped: Vec<String>,
    pub output_dir: PathBuf,
}

/// Builds upload packages from a repository
pub struct PackageBuilder<V: VersionControl> {
    vcs: V,
    events: Arc<dyn DeployEventSink>,
}

impl<V: VersionControl> PackageBuilder<V> {
    pub fn new(vcs: V) -> Self {
        Self {
            vcs,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Diff `from..to` and package the result into `output_dir`.
    ///
    /// `to` is used verbatim as the manifest's source revision; pass a
    /// canonical id if the package must be matched against the config later.
    /// A version control failure leaves `output_dir` untouched.
    pub fn build(
        &self,
        repo: &Path,
        from: &str,
        to: &str,
        output_dir: &Path,
    ) -> SyncResult<PackageOutcome> {
        let paths = self.changes(repo, from, to)?;
        self.package_changes(repo, to, &paths, output_dir)
    }

    /// Paths changed between `from` and `to`, in reported order.
    pub fn changes(&self, repo: &Path, from: &str, to: &str) -> SyncResult<Vec<String>> {
        let paths = self.vcs.changed_files(repo, from, to)?;
        tracing::info!(%from, %to, changed = paths.len(), "diff complete");
        self.events.on_event(DeployEvent::ChangesFound {
            from: from.to_string(),
            to: to.to_string(),
            paths: paths.clone(),
        });
        Ok(paths)
    }

    /// Package an already computed change set.
    pub fn package_changes(
        &self,
        repo: &Path,
        to: &str,
        paths: &[String],
        output_dir: &Path,
    ) -> SyncResult<PackageOutcome> {
        reset_dir(output_dir)?;

        let mut manifest = Manifest::new(to);
        let mut skipped = Vec::new();

        for path in paths {
            let target = TargetPath::new(path).map_err(|e| SyncError::InvalidTargetPath {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let Some(content) = self.vcs.show_file(repo, to, target.as_str())? else {
                tracing::warn!(path = %target, revision = %to, "changed file missing at revision, skipping");
                self.events.on_event(DeployEvent::FileSkipped {
                    path: target.to_string(),
                    reason: format!("not present at {}", to),
                });
                skipped.push(target.to_string());
                continue;
            };

            let number = manifest.next_number();
            fs::write(output_dir.join(number.to_string()), &content)?;
            tracing::debug!(number, path = %target, bytes = content.len(), "packaged");
            self.events.on_event(DeployEvent::FilePackaged {
                number,
                path: target.to_string(),
                bytes: content.len(),
            });
            manifest.push(target);
        }

        JsonManifestRepository::new(output_dir).save(&manifest)?;
        self.events.on_event(DeployEvent::PackageWritten {
            dir: output_dir.to_path_buf(),
            source_revision: to.to_string(),
            file_count: manifest.len(),
        });

        Ok(PackageOutcome {
            manifest,
            skipped,
            output_dir: output_dir.to_path_buf(),
        })
    }
}

/// Delete `dir` if present and create it empty
fn reset_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}
