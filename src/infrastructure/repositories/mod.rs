//! Repository Implementations
//!
//! Concrete implementations of storage for domain entities.

mod manifest;

pub use manifest::{JsonManifestRepository, MANIFEST_FILE_NAME};
