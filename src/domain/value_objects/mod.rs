//! Value Objects
//!
//! Immutable, validated types with no identity.

mod path;
mod revision;

pub use path::{PathError, TargetPath};
pub use revision::{Revision, DEFAULT_PRESENT_REVISION};
