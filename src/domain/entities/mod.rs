//! Domain Entities
//!
//! - `Manifest` - Package numbering and target paths, tagged with a source revision

mod manifest;

pub use manifest::{Manifest, ManifestEntry, ManifestError};
