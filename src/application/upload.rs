//! Upload Use Case
//!
//! Replays a package on the remote server over a single session. Every
//! numbered file is uploaded to its target path below the configured target
//! directory; missing intermediate directories are created on the way.
//!
//! Failures stop the run. Files already uploaded stay on the server.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::RemoteConfig;
use crate::domain::entities::{Manifest, ManifestEntry};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, NoopEventSink, RemoteConnector, RemoteError, RemoteSession,
};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::JsonManifestRepository;

/// A file that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedEntry {
    pub number: u32,
    pub path: String,
    /// Absolute path on the server
    pub remote_path: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedEntry>,
    pub bytes: usize,
}

impl UploadReport {
    fn record(&mut self, entry: UploadedEntry) {
        self.bytes += entry.bytes;
        self.uploaded.push(entry);
    }
}

/// Uploads packages through a `RemoteConnector`
pub struct RemoteDeployer<C: RemoteConnector> {
    connector: C,
    events: Arc<dyn DeployEventSink>,
}

impl<C: RemoteConnector> RemoteDeployer<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Upload every entry of `manifest` from `package_dir`.
    ///
    /// All numbered files are checked before connecting. An empty manifest
    /// returns an empty report without opening a session.
    pub fn upload(
        &self,
        manifest: &Manifest,
        package_dir: &Path,
        remote: &RemoteConfig,
    ) -> SyncResult<UploadReport> {
        let store = JsonManifestRepository::new(package_dir);
        for entry in manifest.entries() {
            let path = store.entry_path(entry.number);
            if !path.is_file() {
                return Err(SyncError::PackageEntryMissing {
                    number: entry.number,
                    path,
                });
            }
        }

        if manifest.is_empty() {
            tracing::info!("manifest is empty, nothing to upload");
            return Ok(UploadReport::default());
        }

        let mut session =
            self.connector
                .connect(remote)
                .map_err(|e| SyncError::Connection {
                    host: remote.address(),
                    message: error_message(e),
                })?;
        tracing::info!(host = %remote.address(), "connected");
        self.events.on_event(DeployEvent::Connected {
            host: remote.host.clone(),
        });

        let result = self.upload_entries(&mut session, manifest, &store, remote);

        // The session is closed on every path; only a failed run reports errors.
        if let Err(e) = session.quit() {
            tracing::warn!(error = %e, "failed to close remote session");
        }

        let report = result?;
        self.events.on_event(DeployEvent::UploadCompleted {
            file_count: report.uploaded.len(),
            bytes: report.bytes,
        });
        Ok(report)
    }

    fn upload_entries<S: RemoteSession>(
        &self,
        session: &mut S,
        manifest: &Manifest,
        store: &JsonManifestRepository,
        remote: &RemoteConfig,
    ) -> SyncResult<UploadReport> {
        let root = remote.target_dir.as_str();
        enter(session, root, root)?;

        let mut report = UploadReport::default();
        for entry in manifest.entries() {
            let content = fs::read(store.entry_path(entry.number))?;
            let uploaded = self.upload_entry(session, root, entry, &content, report.uploaded.len())?;
            self.events.on_event(DeployEvent::FileUploaded {
                number: uploaded.number,
                path: uploaded.path.clone(),
                bytes: uploaded.bytes,
            });
            report.record(uploaded);
        }

        Ok(report)
    }

    fn upload_entry<S: RemoteSession>(
        &self,
        session: &mut S,
        root: &str,
        entry: ManifestEntry<'_>,
        content: &[u8],
        uploaded_so_far: usize,
    ) -> SyncResult<UploadedEntry> {
        let directories = entry.target.directories();

        let mut current = root.to_string();
        for dir in &directories {
            current = join_remote(&current, dir);
            if ensure_directory(session, dir, &current)? {
                tracing::debug!(path = %current, "created remote directory");
                self.events.on_event(DeployEvent::DirectoryCreated {
                    path: current.clone(),
                });
            }
        }

        session
            .put_file(entry.target.file_name(), content)
            .map_err(|e| SyncError::Transfer {
                number: entry.number,
                path: entry.target.to_string(),
                uploaded: uploaded_so_far,
                message: error_message(e),
            })?;
        tracing::debug!(number = entry.number, path = %entry.target, bytes = content.len(), "uploaded");

        if !directories.is_empty() {
            enter(session, root, root)?;
        }

        Ok(UploadedEntry {
            number: entry.number,
            path: entry.target.to_string(),
            remote_path: join_remote(root, entry.target.as_str()),
            bytes: content.len(),
        })
    }
}

/// Create `name` in the working directory unless it exists, then enter it.
///
/// A failed mkdir is not an error if the directory can be entered: it
/// already existed. Returns whether the directory was created.
fn ensure_directory<S: RemoteSession>(
    session: &mut S,
    name: &str,
    full_path: &str,
) -> SyncResult<bool> {
    match session.make_dir(name) {
        Ok(()) => {
            enter(session, name, full_path)?;
            Ok(true)
        }
        Err(mkdir_err) => match session.change_dir(name) {
            Ok(()) => Ok(false),
            Err(_) => Err(SyncError::RemoteDirectory {
                path: full_path.to_string(),
                message: error_message(mkdir_err),
            }),
        },
    }
}

fn enter<S: RemoteSession>(session: &mut S, dir: &str, full_path: &str) -> SyncResult<()> {
    session
        .change_dir(dir)
        .map_err(|e| SyncError::RemoteDirectory {
            path: full_path.to_string(),
            message: error_message(e),
        })
}

fn join_remote(base: &str, rel: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, rel)
    } else {
        format!("{}/{}", base, rel)
    }
}

fn error_message(err: RemoteError) -> String {
    match err {
        RemoteError::Connection(msg) | RemoteError::Command(msg) => msg,
    }
}
