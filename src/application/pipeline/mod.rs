//! Sync Pipeline
//!
//! Orchestrates a synchronization run across its stages:
//!
//! ```text
//! Idle → Diffing → Packaging → UpdatingConfig
//!      → AwaitingConfirmation → Uploading → UpdatingConfig → Done
//! ```
//!
//! Any stage can end in `Failed`. Loading the config belongs to the first
//! stage a run enters: `Diffing` when packaging, `AwaitingConfirmation` for
//! an upload of an existing package. The last synced revision is recorded as
//! soon as a package is written, whether or not an upload follows.
//!
//! ## Usage
//!
//! ```ignore
//! let pipeline = SyncPipeline::new(GitCli::new(), FtpConnector::new(), repo, "upload-package");
//! let report = pipeline.run(&RevisionRequest::default(), &AssumeYes)?;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DeploymentConfig;
use crate::domain::entities::Manifest;
use crate::domain::ports::{
    ConfigRepository, DeployEvent, DeployEventSink, NoopEventSink, RemoteConnector, SyncStage,
    UploadConfirmation, VersionControl,
};
use crate::domain::value_objects::{Revision, DEFAULT_PRESENT_REVISION};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::JsonManifestRepository;

use super::package::PackageBuilder;
use super::upload::{RemoteDeployer, UploadReport};

/// Revisions requested by the user; blanks fall back to the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRequest {
    /// Defaults to the config's last synced revision
    pub from: Option<String>,
    /// Defaults to `HEAD`
    pub to: Option<String>,
}

/// Outcome of the packaging half of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub from: String,
    /// Canonical id of the newer revision; also the manifest's source revision
    pub to: String,
    pub manifest: Manifest,
    pub skipped: Vec<String>,
    pub package_dir: PathBuf,
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub package: PackageSummary,
    /// `None` when nothing was uploaded (empty package or declined)
    pub upload: Option<UploadReport>,
}

/// Outcome of an upload-only run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(UploadReport),
    /// The package has no entries; no session was opened
    NothingToUpload,
    Declined,
}

pub struct SyncPipeline<V, C, R>
where
    V: VersionControl,
    C: RemoteConnector,
    R: ConfigRepository,
{
    vcs: V,
    connector: C,
    config_repo: R,
    package_dir: PathBuf,
    events: Arc<dyn DeployEventSink>,
}

impl<V, C, R> SyncPipeline<V, C, R>
where
    V: VersionControl,
    C: RemoteConnector,
    R: ConfigRepository,
{
    pub fn new(vcs: V, connector: C, config_repo: R, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            vcs,
            connector,
            config_repo,
            package_dir: package_dir.into(),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Build a package and record its revision. Never uploads.
    pub fn package(&self, request: &RevisionRequest) -> SyncResult<PackageSummary> {
        let mut progress = Progress::new(self.events.as_ref());
        let result = self.package_stage(&mut progress, request);
        if result.is_ok() {
            progress.enter(SyncStage::Done);
        }
        progress.finish(result.map(|(_, summary)| summary))
    }

    /// Upload the package already on disk.
    ///
    /// The manifest must have been built from the revision the config records
    /// as last synced; anything else is a stale package.
    pub fn upload(&self, confirm: &dyn UploadConfirmation) -> SyncResult<UploadOutcome> {
        let mut progress = Progress::new(self.events.as_ref());
        let result = self.upload_existing(&mut progress, confirm);
        progress.finish(result)
    }

    /// Package, confirm, upload.
    pub fn run(
        &self,
        request: &RevisionRequest,
        confirm: &dyn UploadConfirmation,
    ) -> SyncResult<RunReport> {
        let mut progress = Progress::new(self.events.as_ref());
        let result = self.run_stages(&mut progress, request, confirm);
        progress.finish(result)
    }

    fn run_stages(
        &self,
        progress: &mut Progress<'_>,
        request: &RevisionRequest,
        confirm: &dyn UploadConfirmation,
    ) -> SyncResult<RunReport> {
        let (config, package) = self.package_stage(progress, request)?;

        let upload = match self.confirm_and_upload(progress, &config, &package.manifest, confirm)? {
            UploadOutcome::Uploaded(report) => Some(report),
            UploadOutcome::NothingToUpload | UploadOutcome::Declined => None,
        };

        Ok(RunReport { package, upload })
    }

    fn package_stage(
        &self,
        progress: &mut Progress<'_>,
        request: &RevisionRequest,
    ) -> SyncResult<(DeploymentConfig, PackageSummary)> {
        progress.enter(SyncStage::Diffing);
        let config = self.load_config()?;
        let repo = config.repo.path.as_path();

        let builder = PackageBuilder::new(&self.vcs).with_events(self.events.clone());

        let from = Revision::or_fallback(
            request.from.as_deref(),
            config.repo.last_synced_revision.as_deref(),
        )
        .ok_or(SyncError::MissingRevision)?;
        let to_alias = Revision::or_fallback(request.to.as_deref(), Some(DEFAULT_PRESENT_REVISION))
            .ok_or(SyncError::MissingRevision)?;

        let to = self.vcs.resolve_revision(repo, to_alias.as_str())?;
        let paths = builder.changes(repo, from.as_str(), &to)?;

        progress.enter(SyncStage::Packaging);
        let outcome = builder.package_changes(repo, &to, &paths, &self.package_dir)?;

        progress.enter(SyncStage::UpdatingConfig);
        self.record_revision(&to)?;

        let summary = PackageSummary {
            from: from.to_string(),
            to,
            manifest: outcome.manifest,
            skipped: outcome.skipped,
            package_dir: outcome.output_dir,
        };
        Ok((config, summary))
    }

    fn upload_existing(
        &self,
        progress: &mut Progress<'_>,
        confirm: &dyn UploadConfirmation,
    ) -> SyncResult<UploadOutcome> {
        progress.enter(SyncStage::AwaitingConfirmation);
        let config = self.load_config()?;
        let manifest = JsonManifestRepository::new(&self.package_dir).load()?;

        let recorded = config.repo.last_synced_revision.as_deref();
        if recorded != Some(manifest.source_revision()) {
            return Err(SyncError::ManifestMismatch {
                manifest: manifest.source_revision().to_string(),
                config: recorded.unwrap_or("(none)").to_string(),
            });
        }

        self.confirm_and_upload(progress, &config, &manifest, confirm)
    }

    fn confirm_and_upload(
        &self,
        progress: &mut Progress<'_>,
        config: &DeploymentConfig,
        manifest: &Manifest,
        confirm: &dyn UploadConfirmation,
    ) -> SyncResult<UploadOutcome> {
        if manifest.is_empty() {
            tracing::info!("package is empty, nothing to upload");
            progress.enter(SyncStage::Done);
            return Ok(UploadOutcome::NothingToUpload);
        }

        progress.enter(SyncStage::AwaitingConfirmation);
        if !confirm.confirm_upload(manifest)? {
            tracing::info!("upload declined");
            self.events.on_event(DeployEvent::Cancelled);
            progress.enter(SyncStage::Done);
            return Ok(UploadOutcome::Declined);
        }

        progress.enter(SyncStage::Uploading);
        let report = RemoteDeployer::new(&self.connector)
            .with_events(self.events.clone())
            .upload(manifest, &self.package_dir, &config.ftp)?;

        progress.enter(SyncStage::UpdatingConfig);
        self.record_revision(manifest.source_revision())?;

        progress.enter(SyncStage::Done);
        Ok(UploadOutcome::Uploaded(report))
    }

    fn load_config(&self) -> SyncResult<DeploymentConfig> {
        let (config, warnings) = self.config_repo.load()?;
        for warning in &warnings {
            tracing::warn!(
                key = %warning.key,
                file = %warning.file.display(),
                "unknown config key ignored"
            );
        }
        Ok(config)
    }

    fn record_revision(&self, revision: &str) -> SyncResult<()> {
        self.config_repo.record_synced_revision(revision)?;
        self.events.on_event(DeployEvent::ConfigSaved {
            revision: revision.to_string(),
        });
        Ok(())
    }
}

/// Tracks the current stage and reports transitions
struct Progress<'a> {
    events: &'a dyn DeployEventSink,
    stage: SyncStage,
}

impl<'a> Progress<'a> {
    fn new(events: &'a dyn DeployEventSink) -> Self {
        Self {
            events,
            stage: SyncStage::Idle,
        }
    }

    fn enter(&mut self, stage: SyncStage) {
        if self.stage == stage {
            return;
        }
        tracing::debug!(from = %self.stage, to = %stage, "stage");
        self.stage = stage;
        self.events.on_event(DeployEvent::StageChanged { stage });
    }

    fn finish<T>(mut self, result: SyncResult<T>) -> SyncResult<T> {
        if let Err(err) = &result {
            let stage = self.stage;
            tracing::error!(%stage, error = %err, "run failed");
            self.events.on_event(DeployEvent::Failed {
                stage,
                error: err.to_string(),
            });
            self.enter(SyncStage::Failed);
        }
        result
    }
}
