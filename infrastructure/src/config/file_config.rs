//! Raw configuration data types
//!
//! These structs mirror the flat key set shared by `sealion.toml` and the
//! environment (`AWS_REGION`, `ENDPOINT_ARN`, ...). They are converted into
//! the serde-free domain [`ChatConfig`] after validation.

use sealion_domain::{ChatConfig, InferenceParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("The environment variable {0} is not defined.")]
    MissingValue(&'static str),

    #[error("{name} = {value} is out of range (maximum {max}).")]
    OutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },
}

/// Raw chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// AWS region for the Bedrock runtime (default: "us-east-1")
    pub aws_region: String,
    /// Imported model ARN, used as model id by both transports
    pub endpoint_arn: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub api_url: Option<String>,
    /// Max tokens per response (default: 1024)
    pub max_tokens: u32,
    /// Sampling temperature (default: 0.0)
    pub temperature: f32,
    /// Top-k sampling for the Bedrock transport (default: 250)
    pub top_k: u32,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        let inference = InferenceParams::default();
        Self {
            aws_region: "us-east-1".to_string(),
            endpoint_arn: None,
            api_url: None,
            max_tokens: inference.max_tokens,
            temperature: inference.temperature,
            top_k: inference.top_k,
        }
    }
}

impl FileChatConfig {
    /// Validate required values and build the domain configuration.
    ///
    /// Blank values count as missing.
    pub fn into_chat_config(self) -> Result<ChatConfig, ConfigValidationError> {
        let endpoint_id = required(self.endpoint_arn, "ENDPOINT_ARN")?;
        let base_url = required(self.api_url, "API_URL")?;
        // Bedrock carries maxTokens as a signed 32-bit integer
        if i32::try_from(self.max_tokens).is_err() {
            return Err(ConfigValidationError::OutOfRange {
                name: "MAX_TOKENS",
                value: u64::from(self.max_tokens),
                max: i32::MAX as u64,
            });
        }

        Ok(ChatConfig {
            region: self.aws_region,
            endpoint_id,
            base_url,
            inference: InferenceParams {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                top_k: self.top_k,
            },
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigValidationError::MissingValue(name))
}
