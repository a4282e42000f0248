//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod config_repository;
pub mod confirmation;
pub mod deploy_events;
pub mod remote_session;
pub mod version_control;

pub use config_repository::ConfigRepository;
pub use confirmation::{AssumeNo, AssumeYes, UploadConfirmation};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink, SyncStage};
pub use remote_session::{RemoteConnector, RemoteError, RemoteSession};
pub use version_control::VersionControl;
