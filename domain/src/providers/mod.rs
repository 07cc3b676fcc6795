//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of backend settings without depending
//! on any serialization format. The infrastructure layer fills them in from
//! environment variables or a config file.

/// Which transport carries the conversation to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// Vendor streaming inference API (Bedrock ConverseStream, with fallback).
    #[default]
    Bedrock,
    /// Generic OpenAI-compatible chat-completions API.
    ChatCompletions,
}

impl TransportKind {
    /// Select the transport from the `--api` flag.
    pub fn from_api_flag(api: bool) -> Self {
        if api {
            TransportKind::ChatCompletions
        } else {
            TransportKind::Bedrock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Bedrock => "bedrock",
            TransportKind::ChatCompletions => "chat-completions",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling and length limits sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceParams {
    /// Max tokens per response (default: 1024).
    pub max_tokens: u32,
    /// Sampling temperature (default: 0.0).
    pub temperature: f32,
    /// Top-k sampling, only understood by the Bedrock transport (default: 250).
    pub top_k: u32,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.0,
            top_k: 250,
        }
    }
}

/// Everything a transport needs to reach the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// AWS region (default: "us-east-1").
    pub region: String,
    /// Model endpoint identifier (imported model ARN).
    pub endpoint_id: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    pub inference: InferenceParams,
}
