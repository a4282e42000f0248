//! Deploy Event Port
//!
//! Provides an observable interface for packaging and upload runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::fmt;
use std::path::PathBuf;

/// Pipeline stage, in the order a full run passes through them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Idle,
    Diffing,
    Packaging,
    AwaitingConfirmation,
    Uploading,
    UpdatingConfig,
    Done,
    Failed,
}

impl SyncStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Diffing => "diffing",
            Self::Packaging => "packaging",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::Uploading => "uploading",
            Self::UpdatingConfig => "updating_config",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// The pipeline moved to a new stage
    StageChanged { stage: SyncStage },

    /// Diff completed
    ChangesFound {
        from: String,
        to: String,
        paths: Vec<String>,
    },

    /// A changed file was written to the package
    FilePackaged {
        number: u32,
        path: String,
        bytes: usize,
    },

    /// A changed file was left out of the package
    FileSkipped { path: String, reason: String },

    /// Package directory and manifest written
    PackageWritten {
        dir: PathBuf,
        source_revision: String,
        file_count: usize,
    },

    /// Last synchronized revision persisted
    ConfigSaved { revision: String },

    /// Remote session opened
    Connected { host: String },

    /// Remote directory was created (not emitted when it already existed)
    DirectoryCreated { path: String },

    /// File uploaded to its target path
    FileUploaded {
        number: u32,
        path: String,
        bytes: usize,
    },

    /// All manifest entries uploaded
    UploadCompleted { file_count: usize, bytes: usize },

    /// User declined the upload
    Cancelled,

    /// Run halted on an error
    Failed { stage: SyncStage, error: String },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - ConsoleEventSink: human-readable progress in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}


#[cfg(test)]
mod tests {
    use super::recording::RecordingEventSink;
    use super::*;

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingEventSink::default();

        sink.on_event(DeployEvent::StageChanged {
            stage: SyncStage::Diffing,
        });
        sink.on_event(DeployEvent::FileSkipped {
            path: "d.js".to_string(),
            reason: "not present at R2".to_string(),
        });

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.stages(), vec![SyncStage::Diffing]);
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(
            SyncStage::AwaitingConfirmation.to_string(),
            "awaiting_confirmation"
        );
        assert_eq!(SyncStage::UpdatingConfig.as_str(), "updating_config");
    }
}
