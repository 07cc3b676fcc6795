//! InvokeModelWithResponseStream call
//!
//! Fallback for imported models that reject ConverseStream. Sends only the
//! latest user turn as a raw prompt and reads `generation` chunks back.

use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::operation::invoke_model_with_response_stream::InvokeModelWithResponseStreamOutput;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::ResponseStream;
use sealion_application::{ChatTransport, FragmentSource, GatewayError};
use sealion_domain::{Conversation, InferenceParams, StreamFragment};
use std::sync::Arc;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";

pub struct InvokeModelTransport {
    client: Arc<BedrockClient>,
    model_id: String,
    params: InferenceParams,
}

impl InvokeModelTransport {
    pub fn new(client: Arc<BedrockClient>, model_id: impl Into<String>, params: InferenceParams) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            params,
        }
    }
}

#[async_trait]
impl ChatTransport for InvokeModelTransport {
    fn name(&self) -> &'static str {
        "bedrock-invoke-model-stream"
    }

    async fn open_stream(
        &self,
        conversation: &Conversation,
    ) -> Result<Box<dyn FragmentSource>, GatewayError> {
        let prompt = conversation
            .latest_user_turn()
            .map(|turn| turn.content.as_str())
            .ok_or_else(|| GatewayError::Other("No user message to send".to_string()))?;
        let body = types::prompt_request_body(prompt, &self.params)?;

        debug!(
            model_id = %self.model_id,
            bytes = body.len(),
            "Sending InvokeModelWithResponseStream request"
        );

        let response = self
            .client
            .invoke_model_with_response_stream()
            .model_id(&self.model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| types::convert_invoke_error(&e))?;

        Ok(Box::new(GenerationFragmentSource { response }))
    }
}

/// Pulls `generation` text out of InvokeModelWithResponseStream chunks.
pub struct GenerationFragmentSource {
    response: InvokeModelWithResponseStreamOutput,
}

#[async_trait]
impl FragmentSource for GenerationFragmentSource {
    async fn next_fragment(&mut self) -> Result<Option<StreamFragment>, GatewayError> {
        loop {
            let event = self
                .response
                .body
                .recv()
                .await
                .map_err(|e| types::convert_stream_error(&e))?;

            let Some(event) = event else {
                return Ok(None);
            };
            let ResponseStream::Chunk(part) = event else {
                continue;
            };
            let Some(bytes) = part.bytes() else {
                continue;
            };
            if let Some(fragment) = types::parse_generation_chunk(bytes.as_ref())? {
                return Ok(Some(fragment));
            }
        }
    }
}
