//! LLM Gateway port
//!
//! Defines the interface for streaming a reply out of an LLM backend.
//!
//! A [`ChatTransport`] turns a [`Conversation`] into a [`FragmentSource`]:
//! a pull-based stream of [`StreamFragment`]s that ends with `Ok(None)`.
//! Transports that can detect at call time that the model does not support
//! them implement [`StreamingCall`] instead and report
//! [`StreamAttempt::Unsupported`] as a value, so the caller can pick a
//! fallback without matching on error text.

use async_trait::async_trait;
use sealion_domain::{Conversation, StreamFragment};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// Every variant is fatal for the chat session; there is no retry.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("The model is not ready for inference. Please wait and try again later. ({0})")]
    ModelNotReady(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    pub fn is_model_not_ready(&self) -> bool {
        matches!(self, GatewayError::ModelNotReady(_))
    }
}

/// A blocking-style pull source of reply fragments.
///
/// Each call suspends until the backend delivers the next fragment
/// (`Ok(Some)`), signals end-of-stream (`Ok(None)`) or fails (`Err`).
#[async_trait]
pub trait FragmentSource: Send {
    async fn next_fragment(&mut self) -> Result<Option<StreamFragment>, GatewayError>;
}

/// Strategy that produces a fragment stream for a conversation.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Send the conversation and return the reply stream.
    async fn open_stream(
        &self,
        conversation: &Conversation,
    ) -> Result<Box<dyn FragmentSource>, GatewayError>;
}

/// Outcome of trying a streaming call that a model may not support.
pub enum StreamAttempt {
    /// The call was accepted; the reply arrives through this source.
    Streaming(Box<dyn FragmentSource>),
    /// The backend rejected the operation for this model.
    Unsupported(String),
}

impl std::fmt::Debug for StreamAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamAttempt::Streaming(_) => f.write_str("Streaming(..)"),
            StreamAttempt::Unsupported(reason) => {
                f.debug_tuple("Unsupported").field(reason).finish()
            }
        }
    }
}

/// A streaming call that reports "unsupported" distinctly from fatal errors.
#[async_trait]
pub trait StreamingCall: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, conversation: &Conversation) -> Result<StreamAttempt, GatewayError>;
}
