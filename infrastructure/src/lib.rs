//! Infrastructure layer for sealion-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, ConfigValidationError, FileChatConfig};
pub use providers::bedrock::{BedrockTransport, ConverseStreamCall, InvokeModelTransport};
pub use providers::build_transport;
pub use providers::openai::ChatCompletionsTransport;
