//! AWS Bedrock provider
//!
//! Streams replies from an imported model through ConverseStream, falling
//! back to InvokeModelWithResponseStream when the model rejects Converse.

mod adapter;
mod converse;
mod invoke;
mod types;

pub use adapter::{BedrockTransport, connect};
pub use converse::{ConverseFragmentSource, ConverseStreamCall};
pub use invoke::{GenerationFragmentSource, InvokeModelTransport};
