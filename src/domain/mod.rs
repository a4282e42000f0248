//! Domain Layer
//!
//! Pure types and interfaces, no I/O.
//!
//! ## Structure
//!
//! - `entities/` - Manifest
//! - `value_objects/` - TargetPath, Revision
//! - `ports/` - Interfaces implemented by infrastructure (git, FTP, config, events)

pub mod entities;
pub mod ports;
pub mod value_objects;
