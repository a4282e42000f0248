use std::path::PathBuf;

use crossterm::style::Stylize;
use git_remote_sync::config::{ENV_FTP_HOST, ENV_FTP_PASSWORD};
use git_remote_sync::SyncError;

use crate::ui::icon::Icon;
use crate::ui::theme;

/// A rendered error: what failed, why, and how to fix it
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    subject: String,
    message: String,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let icon = Icon::Error.colored(supports_color, supports_unicode);
        let heading = if supports_color {
            format!("{}", "ERROR".with(theme::colors::ERROR).bold())
        } else {
            "ERROR".to_string()
        };

        let mut out = format!("{} {}  {}\n", icon, heading, self.subject);
        for line in self.message.lines() {
            out.push_str(&format!("  {}\n", line));
        }

        if let Some(fix) = &self.fix {
            out.push('\n');
            let mut lines = fix.lines();
            if let Some(first) = lines.next() {
                out.push_str(&format!("  FIX: {}\n", first));
            }
            for line in lines {
                out.push_str(&format!("       {}\n", line));
            }
        }
        out
    }
}

pub fn format_sync_error(err: &SyncError) -> String {
    let caps = crate::ui::terminal::detect_capabilities_stderr();
    format_sync_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_sync_error_with(err: &SyncError, supports_color: bool, supports_unicode: bool) -> String {
    let (subject, fix): (String, Option<String>) = match err {
        SyncError::VcsInvocation { .. } => (
            "git".to_string(),
            Some("Check that repo.path is a git repository and both revisions exist.".to_string()),
        ),
        SyncError::Connection { host, .. } => (
            host.clone(),
            Some(format!(
                "Check the ftp section of the config (host, port, username, password).\n\
                 {} and {} override the host and password.",
                ENV_FTP_HOST, ENV_FTP_PASSWORD
            )),
        ),
        SyncError::RemoteDirectory { path, .. } => (
            path.clone(),
            Some("Make sure the FTP user may create directories under ftp.targetDir.".to_string()),
        ),
        SyncError::Transfer { path, .. } => (
            path.clone(),
            Some(
                "Run `git-remote-sync upload` again once the server is reachable.\n\
                 Files uploaded before the failure are overwritten with the same content."
                    .to_string(),
            ),
        ),
        SyncError::ConfigNotFound { path } => (
            path.display().to_string(),
            Some("Create the config file or pass --config <FILE>.".to_string()),
        ),
        SyncError::InvalidConfig { file, .. } => (
            file.display().to_string(),
            Some("The config needs repo.path and ftp.host, ftp.username, ftp.password, ftp.targetDir.".to_string()),
        ),
        SyncError::InvalidManifest { file, .. } | SyncError::PackageNotFound { path: file } => (
            file.display().to_string(),
            Some("Build a fresh package with `git-remote-sync package`.".to_string()),
        ),
        SyncError::PackageEntryMissing { path, .. } => (
            path.display().to_string(),
            Some("Build a fresh package with `git-remote-sync package`.".to_string()),
        ),
        SyncError::ManifestMismatch { .. } => (
            "upload package".to_string(),
            Some(
                "Rebuild the package with `git-remote-sync package`,\n\
                 or package and upload in one step with `git-remote-sync run`."
                    .to_string(),
            ),
        ),
        SyncError::InvalidTargetPath { path, .. } => (path.clone(), None),
        SyncError::MissingRevision => (
            "revision".to_string(),
            Some("Pass --from <REVISION> or set repo.lastSyncedRevision in the config.".to_string()),
        ),
        SyncError::Io(_) | SyncError::Json(_) => ("git-remote-sync".to_string(), None),
    };

    let mut block = ErrorBlock::new(subject, err.to_string());
    if let Some(fix) = fix {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error) -> String {
    if let Some(sync) = err.downcast_ref::<SyncError>() {
        return format_sync_error(sync);
    }

    let caps = crate::ui::terminal::detect_capabilities_stderr();
    ErrorBlock::new("git-remote-sync", format!("{:#}", err))
        .render(caps.supports_color, caps.supports_unicode)
}

/// Report a failed command on stderr.
///
/// In JSON mode the failure has already been emitted as an event on stdout,
/// so stderr only gets the plain message.
pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        eprintln!("error: {:#}", err);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        let file = err.downcast_ref::<SyncError>().and_then(error_file);
        println!("{}", github_annotation(&format!("{:#}", err), file));
    }

    eprint!("{}", format_error(err));
}

fn error_file(err: &SyncError) -> Option<PathBuf> {
    match err {
        SyncError::ConfigNotFound { path } | SyncError::PackageNotFound { path } => {
            Some(path.clone())
        }
        SyncError::InvalidConfig { file, .. } | SyncError::InvalidManifest { file, .. } => {
            Some(file.clone())
        }
        _ => None,
    }
}

/// `::error` workflow command understood by GitHub Actions
fn github_annotation(message: &str, file: Option<PathBuf>) -> String {
    let escape = |s: &str| {
        s.replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A")
    };
    match file {
        Some(file) => format!(
            "::error file={},title=git-remote-sync::{}",
            escape(&file.display().to_string()).replace(',', "%2C"),
            escape(message)
        ),
        None => format!("::error title=git-remote-sync::{}", escape(message)),
    }
}
