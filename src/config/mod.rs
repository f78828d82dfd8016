//! Configuration management for Sessiongate

pub mod loader;
mod schema;

pub use loader::{load_config, load_config_from_path, parse_config, write_default_config};
pub use schema::*;
