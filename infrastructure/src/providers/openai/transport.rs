//! Chat-completions transport and its SSE fragment source

use super::types::{self, ChatCompletionRequest, SseData};
use async_trait::async_trait;
use eventsource_stream::{Event, Eventsource};
use futures::StreamExt;
use futures::stream::BoxStream;
use sealion_application::{ChatTransport, FragmentSource, GatewayError};
use sealion_domain::{ChatConfig, Conversation, InferenceParams, StreamFragment};
use tracing::{debug, trace};

/// API key sent to the OpenAI-compatible gateway.
///
/// The Bedrock access gateway authenticates with AWS credentials on its own
/// side and only requires the header to be present.
pub const GATEWAY_API_KEY: &str = "bedrock";

pub struct ChatCompletionsTransport {
    client: reqwest::Client,
    url: String,
    model: String,
    params: InferenceParams,
}

impl ChatCompletionsTransport {
    pub fn new(config: &ChatConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            GatewayError::ConnectionError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            url: completions_url(&config.base_url),
            model: config.endpoint_id.clone(),
            params: config.inference,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// `{base_url}/chat/completions`, tolerating a trailing slash on the base.
pub fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl ChatTransport for ChatCompletionsTransport {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn open_stream(
        &self,
        conversation: &Conversation,
    ) -> Result<Box<dyn FragmentSource>, GatewayError> {
        let request = ChatCompletionRequest::streaming(&self.model, conversation, &self.params);

        debug!(
            url = %self.url,
            messages = request.messages.len(),
            "Calling chat-completions API"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(GATEWAY_API_KEY)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await;
            return Err(types::http_error_from_body(status.as_u16(), body));
        }

        Ok(Box::new(SseFragmentSource::from_byte_stream(
            response.bytes_stream(),
        )))
    }
}

/// Pull-based reader over an SSE body.
pub struct SseFragmentSource {
    events: BoxStream<'static, Result<Event, String>>,
    done: bool,
}

impl SseFragmentSource {
    pub fn from_byte_stream<S, B, E>(bytes: S) -> Self
    where
        S: futures::Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let events = bytes
            .eventsource()
            .map(|event| event.map_err(|e| e.to_string()))
            .boxed();
        Self {
            events,
            done: false,
        }
    }
}

#[async_trait]
impl FragmentSource for SseFragmentSource {
    async fn next_fragment(&mut self) -> Result<Option<StreamFragment>, GatewayError> {
        while !self.done {
            let event = match self.events.next().await {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    self.done = true;
                    return Err(GatewayError::ConnectionError(format!("SSE stream error: {}", e)));
                }
                None => break,
            };

            trace!("Chat-completions SSE: {:?}", event.data);
            if event.data.is_empty() {
                continue;
            }

            match types::parse_event_data(&event.data)? {
                SseData::Fragment(fragment) => return Ok(Some(fragment)),
                SseData::Done => break,
            }
        }

        self.done = true;
        Ok(None)
    }
}
