//! Wire types for the chat-completions API
//!
//! Request bodies are borrowed views of the domain conversation; streamed
//! chunks are reduced to [`SseData`].

use sealion_application::GatewayError;
use sealion_domain::{Conversation, InferenceParams, StreamFragment};
use serde::{Deserialize, Serialize};

/// Sentinel payload that closes an OpenAI SSE stream.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Streaming request carrying the full ordered turn list.
    pub fn streaming(model: &'a str, conversation: &'a Conversation, params: &InferenceParams) -> Self {
        Self {
            model,
            messages: conversation
                .turns()
                .iter()
                .map(|turn| ChatMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
            stream: true,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

/// One decoded SSE payload.
#[derive(Debug, PartialEq, Eq)]
pub enum SseData {
    Fragment(StreamFragment),
    Done,
}

/// Decode the `data` field of one SSE event.
///
/// The fragment is `choices[0].delta.content`; a missing or null content
/// (role-only deltas, finish chunks) yields an empty fragment rather than
/// being skipped.
pub fn parse_event_data(data: &str) -> Result<SseData, GatewayError> {
    let data = data.trim();
    if data == DONE_SENTINEL {
        return Ok(SseData::Done);
    }

    let value: serde_json::Value = serde_json::from_str(data).map_err(|e| {
        GatewayError::MalformedResponse(format!("SSE parsing error: {}, data: {}", e, data))
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .unwrap_or("An error occurred during streaming");
        return Err(GatewayError::RequestFailed(format!("SSE API error: {}", message)));
    }

    let chunk: ChatCompletionChunk = serde_json::from_value(value).map_err(|e| {
        GatewayError::MalformedResponse(format!("SSE data schema error: {}, data: {}", e, data))
    })?;

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .unwrap_or_default();
    Ok(SseData::Fragment(StreamFragment::new(content)))
}

/// Whether an HTTP error body says the model endpoint is still warming up.
pub fn is_model_not_ready(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("modelnotready") || lower.contains("not ready")
}

/// Map a non-success HTTP response to a gateway error.
pub fn http_error(status: u16, body: &str) -> GatewayError {
    if is_model_not_ready(body) {
        GatewayError::ModelNotReady(body.trim().to_string())
    } else {
        GatewayError::RequestFailed(format!("HTTP {}: {}", status, body.trim()))
    }
}

/// Map a non-success HTTP response whose body may have failed to arrive.
pub fn http_error_from_body<E: std::fmt::Display>(
    status: u16,
    body: Result<String, E>,
) -> GatewayError {
    match body {
        Ok(body) => http_error(status, &body),
        Err(e) => GatewayError::RequestFailed(format!(
            "HTTP {} (failed to read response body: {})",
            status, e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str) -> SseData {
        SseData::Fragment(StreamFragment::new(text))
    }

    #[test]
    fn test_content_delta() {
        let data = r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"Hel"}}]}"#;
        assert_eq!(parse_event_data(data).unwrap(), fragment("Hel"));
    }

    #[test]
    fn test_role_only_delta_is_empty_fragment() {
        let data = r#"{"object":"chat.completion.chunk","choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_event_data(data).unwrap(), fragment(""));
    }

    #[test]
    fn test_null_content_and_finish_reason() {
        let data = r#"{"object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":null},"finish_reason":"stop"}]}"#;
        assert_eq!(parse_event_data(data).unwrap(), fragment(""));
    }

    #[test]
    fn test_empty_choices_is_empty_fragment() {
        let data = r#"{"object":"chat.completion.chunk","choices":[],"usage":{"total_tokens":3}}"#;
        assert_eq!(parse_event_data(data).unwrap(), fragment(""));
    }

    #[test]
    fn test_done_sentinel() {
        assert_eq!(parse_event_data("[DONE]").unwrap(), SseData::Done);
    }

    #[test]
    fn test_api_error_payload() {
        let data = r#"{"error":{"message":"Rate limit exceeded","type":"rate_limit"}}"#;
        let err = parse_event_data(data).unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m.contains("Rate limit")));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_event_data("{not json").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn test_request_carries_full_history() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.push_assistant("hello");
        conversation.push_user("bye?");
        let params = InferenceParams {
            max_tokens: 64,
            temperature: 0.5,
            top_k: 10,
        };

        let request = ChatCompletionRequest::streaming("arn:model", &conversation, &params);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "arn:model",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "bye?"}
                ],
                "stream": true,
                "max_tokens": 64,
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_http_error_model_not_ready() {
        let err = http_error(424, r#"{"message":"ModelNotReadyException: model is warming up"}"#);
        assert!(err.is_model_not_ready());
    }

    #[test]
    fn test_http_error_body_read_failure_is_reported() {
        let err = http_error_from_body(502, Err::<String, _>("connection reset by peer"));
        assert!(matches!(
            err,
            GatewayError::RequestFailed(ref m)
                if m == "HTTP 502 (failed to read response body: connection reset by peer)"
        ));
    }

    #[test]
    fn test_http_error_from_readable_body() {
        let err = http_error_from_body(503, Ok::<_, String>("ModelNotReady".to_string()));
        assert!(err.is_model_not_ready());
    }

    #[test]
    fn test_http_error_generic() {
        let err = http_error(500, "boom");
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m == "HTTP 500: boom"));
    }
}
