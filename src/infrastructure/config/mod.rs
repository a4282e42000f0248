//! Configuration repository implementations

mod json_config;

pub use json_config::JsonConfigRepository;
