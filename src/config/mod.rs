//! Configuration module
//!
//! Handles loading and validating the connection descriptor from TOML files,
//! environment variables, and inline values.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str, load_from_value};
pub use types::*;
