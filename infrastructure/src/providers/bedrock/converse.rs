//! ConverseStream call
//!
//! The preferred Bedrock path. Models imported without Converse support are
//! reported as [`StreamAttempt::Unsupported`] so the caller can fall back.

use super::types::{self, ConverseStreamRejection};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::operation::converse_stream::ConverseStreamOutput as ConverseStreamResponse;
use sealion_application::{FragmentSource, GatewayError, StreamAttempt, StreamingCall};
use sealion_domain::{Conversation, InferenceParams, StreamFragment};
use std::sync::Arc;
use tracing::debug;

pub struct ConverseStreamCall {
    client: Arc<BedrockClient>,
    model_id: String,
    params: InferenceParams,
}

impl ConverseStreamCall {
    pub fn new(client: Arc<BedrockClient>, model_id: impl Into<String>, params: InferenceParams) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            params,
        }
    }
}

#[async_trait]
impl StreamingCall for ConverseStreamCall {
    fn name(&self) -> &'static str {
        "bedrock-converse-stream"
    }

    async fn attempt(&self, conversation: &Conversation) -> Result<StreamAttempt, GatewayError> {
        let messages = types::convert_conversation(conversation)?;
        let inference = types::inference_config(&self.params)?;
        debug!(
            model_id = %self.model_id,
            turns = messages.len(),
            "Sending ConverseStream request"
        );

        let result = self
            .client
            .converse_stream()
            .model_id(&self.model_id)
            .set_messages(Some(messages))
            .inference_config(inference)
            .additional_model_request_fields(types::additional_request_fields(&self.params))
            .send()
            .await;

        match result {
            Ok(response) => Ok(StreamAttempt::Streaming(Box::new(ConverseFragmentSource {
                response,
            }))),
            Err(err) => match types::classify_converse_stream_error(&err) {
                ConverseStreamRejection::Unsupported(reason) => Ok(StreamAttempt::Unsupported(reason)),
                ConverseStreamRejection::Fatal(e) => Err(e),
            },
        }
    }
}

/// Pulls text deltas out of a ConverseStream event stream.
pub struct ConverseFragmentSource {
    response: ConverseStreamResponse,
}

#[async_trait]
impl FragmentSource for ConverseFragmentSource {
    async fn next_fragment(&mut self) -> Result<Option<StreamFragment>, GatewayError> {
        loop {
            let event = self
                .response
                .stream
                .recv()
                .await
                .map_err(|e| types::convert_stream_error(&e))?;

            let Some(event) = event else {
                return Ok(None);
            };
            if let Some(text) = types::converse_event_text(&event) {
                return Ok(Some(StreamFragment::from(text)));
            }
        }
    }
}
