//! Configuration loading for sealion-chat
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. Environment variables
//! 2. Project root: `./sealion.toml`
//! 3. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileChatConfig};
pub use loader::{ConfigError, ConfigLoader, ENV_KEYS, PROJECT_CONFIG_FILE};
