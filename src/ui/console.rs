//! Human-readable progress for terminal runs

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;
use git_remote_sync::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::icon::Icon;
use crate::ui::theme;

/// Shorten a full commit hash for display; other revision names pass through
pub fn short_revision(revision: &str) -> &str {
    if revision.len() == 40 && revision.bytes().all(|b| b.is_ascii_hexdigit()) {
        &revision[..7]
    } else {
        revision
    }
}

/// Writes one line per event. Stage changes and remote directory creation
/// only show with `-v`.
pub struct ConsoleEventSink {
    verbose: u8,
    color: bool,
    unicode: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(verbose: u8) -> Self {
        let caps = crate::ui::terminal::detect_capabilities();
        Self::with_writer(io::stdout(), verbose, caps.supports_color, caps.supports_unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        verbose: u8,
        color: bool,
        unicode: bool,
    ) -> Self {
        Self {
            verbose,
            color,
            unicode,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{}", text.with(theme::colors::DIM))
        } else {
            text.to_string()
        }
    }

    fn format(&self, event: DeployEvent) -> Option<String> {
        let line = match event {
            DeployEvent::StageChanged { stage } if self.verbose > 0 => {
                format!("{} {}", self.icon(Icon::Progress), self.dim(stage.as_str()))
            }
            DeployEvent::StageChanged { .. } => return None,

            DeployEvent::ChangesFound { from, to, paths } => format!(
                "{} {} changed file(s) between {} and {}",
                self.icon(Icon::Diff),
                paths.len(),
                short_revision(&from),
                short_revision(&to)
            ),

            DeployEvent::FilePackaged {
                number,
                path,
                bytes,
            } => format!(
                "  {} #{} {} {}",
                self.icon(Icon::Arrow),
                number,
                path,
                self.dim(&format!("({} bytes)", bytes))
            ),

            DeployEvent::FileSkipped { path, reason } => {
                format!("{} skipped {}: {}", self.icon(Icon::Warning), path, reason)
            }

            DeployEvent::PackageWritten {
                dir,
                source_revision,
                file_count,
            } => format!(
                "{} package written to {} ({} file(s), revision {})",
                self.icon(Icon::Package),
                dir.display(),
                file_count,
                short_revision(&source_revision)
            ),

            DeployEvent::ConfigSaved { revision } => format!(
                "{} last synced revision is now {}",
                self.icon(Icon::Success),
                short_revision(&revision)
            ),

            DeployEvent::Connected { host } => {
                format!("{} connected to {}", self.icon(Icon::Remote), host)
            }

            DeployEvent::DirectoryCreated { path } if self.verbose > 0 => {
                format!("  {} created {}/", self.icon(Icon::Arrow), path)
            }
            DeployEvent::DirectoryCreated { .. } => return None,

            DeployEvent::FileUploaded {
                number,
                path,
                bytes,
            } => format!(
                "  {} #{} {} {}",
                self.icon(Icon::Success),
                number,
                path,
                self.dim(&format!("({} bytes)", bytes))
            ),

            DeployEvent::UploadCompleted { file_count, bytes } => format!(
                "{} uploaded {} file(s), {} bytes",
                self.icon(Icon::Success),
                file_count,
                bytes
            ),

            DeployEvent::Cancelled => format!("{} upload cancelled", self.icon(Icon::Warning)),

            // Reported by the command's error output.
            DeployEvent::Failed { .. } => return None,
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.format(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
