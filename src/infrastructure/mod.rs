//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `vcs/` - git CLI
//! - `remote/` - FTP sessions
//! - `config/` - JSON config repository
//! - `repositories/` - manifest storage
//! - `events/` - NDJSON event sink
//! - `fs/` - atomic writes

pub mod config;
pub mod events;
pub mod fs;
pub mod remote;
pub mod repositories;
pub mod vcs;

// Re-export for convenience
pub use config::JsonConfigRepository;
pub use events::JsonEventSink;
pub use remote::{FtpConnector, FtpSession};
pub use repositories::{JsonManifestRepository, MANIFEST_FILE_NAME};
pub use vcs::GitCli;
