//! Terminal presentation for the CLI

pub mod confirm;
pub mod console;
pub mod error;
pub mod icon;
pub mod terminal;
pub mod theme;
