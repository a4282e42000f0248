//! JSON Event Sink
//!
//! Outputs run events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let command = self.command;
        let json = match event {
            DeployEvent::StageChanged { stage } => serde_json::json!({
                "event": "stage",
                "command": command,
                "stage": stage.as_str(),
            }),

            DeployEvent::ChangesFound { from, to, paths } => serde_json::json!({
                "event": "changes",
                "command": command,
                "from": from,
                "to": to,
                "count": paths.len(),
                "paths": paths,
            }),

            DeployEvent::FilePackaged {
                number,
                path,
                bytes,
            } => serde_json::json!({
                "event": "item_packaged",
                "command": command,
                "number": number,
                "path": path,
                "bytes": bytes,
            }),

            DeployEvent::FileSkipped { path, reason } => serde_json::json!({
                "event": "item_skipped",
                "command": command,
                "path": path,
                "reason": reason,
            }),

            DeployEvent::PackageWritten {
                dir,
                source_revision,
                file_count,
            } => serde_json::json!({
                "event": "package_written",
                "command": command,
                "dir": dir.display().to_string(),
                "source_revision": source_revision,
                "file_count": file_count,
            }),

            DeployEvent::ConfigSaved { revision } => serde_json::json!({
                "event": "config_saved",
                "command": command,
                "revision": revision,
            }),

            DeployEvent::Connected { host } => serde_json::json!({
                "event": "connected",
                "command": command,
                "host": host,
            }),

            DeployEvent::DirectoryCreated { path } => serde_json::json!({
                "event": "directory_created",
                "command": command,
                "path": path,
            }),

            DeployEvent::FileUploaded {
                number,
                path,
                bytes,
            } => serde_json::json!({
                "event": "item_uploaded",
                "command": command,
                "number": number,
                "path": path,
                "bytes": bytes,
            }),

            DeployEvent::UploadCompleted { file_count, bytes } => serde_json::json!({
                "event": "upload_complete",
                "command": command,
                "uploaded": file_count,
                "bytes": bytes,
            }),

            DeployEvent::Cancelled => serde_json::json!({
                "event": "cancelled",
                "command": command,
            }),

            DeployEvent::Failed { stage, error } => serde_json::json!({
                "event": "error",
                "command": command,
                "stage": stage.as_str(),
                "message": error,
            }),
        };

        self.write_event(json);
    }
}
