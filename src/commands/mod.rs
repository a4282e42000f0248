//! Subcommand entry points

pub mod interactive;
pub mod package;
pub mod run;
pub mod upload;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use git_remote_sync::domain::ports::{AssumeNo, AssumeYes, DeployEventSink, UploadConfirmation};
use git_remote_sync::infrastructure::JsonEventSink;
use git_remote_sync::{FtpConnector, GitCli, JsonConfigRepository, SyncPipeline};

use crate::ui::confirm::DialoguerConfirmer;
use crate::ui::console::ConsoleEventSink;

pub(crate) type Pipeline = SyncPipeline<GitCli, FtpConnector, JsonConfigRepository>;

pub(crate) fn build_pipeline(
    config: &Path,
    package_dir: &Path,
    events: Arc<dyn DeployEventSink>,
) -> Result<Pipeline> {
    let git = GitCli::new();
    if !git.is_available() {
        bail!("git was not found on PATH");
    }
    Ok(
        SyncPipeline::new(git, FtpConnector::new(), JsonConfigRepository::new(config), package_dir)
            .with_events(events),
    )
}

pub(crate) fn event_sink(command: &'static str, json: bool, verbose: u8) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::stdout(verbose))
    }
}

/// Pick who answers the upload question.
///
/// Without `--yes`, uploads are declined when nobody can be asked: in JSON
/// mode, or when stdin is not a terminal.
pub(crate) fn confirmer(yes: bool, json: bool) -> Box<dyn UploadConfirmation> {
    if yes {
        return Box::new(AssumeYes);
    }
    if json || !crate::ui::terminal::can_prompt() {
        tracing::warn!("cannot ask for confirmation, upload will be skipped (pass --yes to upload)");
        return Box::new(AssumeNo);
    }
    Box::new(DialoguerConfirmer)
}
