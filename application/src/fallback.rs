//! Attempt/fallback transport combinator
//!
//! Tries a [`StreamingCall`] first and switches to a secondary
//! [`ChatTransport`] only when the first reports
//! [`StreamAttempt::Unsupported`]. Fatal errors from the preferred call are
//! returned unchanged. The choice is made on every call; nothing is cached,
//! so each turn re-attempts the preferred call.

use crate::ports::llm_gateway::{
    ChatTransport, FragmentSource, GatewayError, StreamAttempt, StreamingCall,
};
use async_trait::async_trait;
use sealion_domain::Conversation;
use tracing::{debug, warn};

pub struct FallbackTransport<P, F> {
    preferred: P,
    fallback: F,
}

impl<P: StreamingCall, F: ChatTransport> FallbackTransport<P, F> {
    pub fn new(preferred: P, fallback: F) -> Self {
        Self {
            preferred,
            fallback,
        }
    }
}

#[async_trait]
impl<P: StreamingCall, F: ChatTransport> ChatTransport for FallbackTransport<P, F> {
    fn name(&self) -> &'static str {
        self.preferred.name()
    }

    async fn open_stream(
        &self,
        conversation: &Conversation,
    ) -> Result<Box<dyn FragmentSource>, GatewayError> {
        match self.preferred.attempt(conversation).await? {
            StreamAttempt::Streaming(source) => {
                debug!(call = self.preferred.name(), "Streaming call accepted");
                Ok(source)
            }
            StreamAttempt::Unsupported(reason) => {
                warn!(
                    preferred = self.preferred.name(),
                    fallback = self.fallback.name(),
                    "Streaming call unsupported for this model, falling back: {}",
                    reason
                );
                self.fallback.open_stream(conversation).await
            }
        }
    }
}
