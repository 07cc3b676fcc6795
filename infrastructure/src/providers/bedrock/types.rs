//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Converts the domain conversation into Bedrock request shapes, and Bedrock
//! stream events and errors into fragments and [`GatewayError`]s.

use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::converse_stream::ConverseStreamError;
use aws_sdk_bedrockruntime::operation::invoke_model_with_response_stream::InvokeModelWithResponseStreamError;
use aws_sdk_bedrockruntime::types as bedrock;
use aws_smithy_types::Document;
use sealion_application::GatewayError;
use sealion_domain::{Conversation, InferenceParams, Role, StreamFragment};
use serde::{Deserialize, Serialize};

// ─── Domain → Bedrock ────────────────────────────────────────────

fn convert_role(role: Role) -> bedrock::ConversationRole {
    match role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
    }
}

/// Convert the conversation into Converse messages, one text block per turn.
pub fn convert_conversation(
    conversation: &Conversation,
) -> Result<Vec<bedrock::Message>, GatewayError> {
    conversation
        .turns()
        .iter()
        .map(|turn| {
            bedrock::Message::builder()
                .role(convert_role(turn.role))
                .content(bedrock::ContentBlock::Text(turn.content.clone()))
                .build()
                .map_err(|e| GatewayError::Other(format!("Failed to build message: {}", e)))
        })
        .collect()
}

/// `inferenceConfig` for ConverseStream.
///
/// `maxTokens` is an `i32` on the wire; larger values are rejected rather
/// than wrapped.
pub fn inference_config(
    params: &InferenceParams,
) -> Result<bedrock::InferenceConfiguration, GatewayError> {
    let max_tokens = i32::try_from(params.max_tokens).map_err(|_| {
        GatewayError::Other(format!(
            "max_tokens {} exceeds the Bedrock limit of {}",
            params.max_tokens,
            i32::MAX
        ))
    })?;

    Ok(bedrock::InferenceConfiguration::builder()
        .max_tokens(max_tokens)
        .temperature(params.temperature)
        .build())
}

/// `additionalModelRequestFields` carrying top-k for imported models.
pub fn additional_request_fields(params: &InferenceParams) -> Document {
    json_to_document(&serde_json::json!({
        "parameters": {
            "top_k": params.top_k,
        }
    }))
}

/// Body of the prompt-style fallback request.
#[derive(Debug, Serialize)]
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
    pub max_gen_len: u32,
    pub temperature: f32,
}

pub fn prompt_request_body(prompt: &str, params: &InferenceParams) -> Result<Vec<u8>, GatewayError> {
    serde_json::to_vec(&PromptRequest {
        prompt,
        max_gen_len: params.max_tokens,
        temperature: params.temperature,
    })
    .map_err(|e| GatewayError::Other(format!("Failed to encode prompt request: {}", e)))
}

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Text carried by a ConverseStream event, if it is a text content delta.
///
/// Message start/stop, content block start/stop and metadata events carry
/// no text and yield `None`.
pub fn converse_event_text(event: &bedrock::ConverseStreamOutput) -> Option<&str> {
    match event {
        bedrock::ConverseStreamOutput::ContentBlockDelta(delta_event) => {
            delta_text(delta_event.delta())
        }
        _ => None,
    }
}

/// Text of a content block delta (tool-use and reasoning deltas are ignored).
pub fn delta_text(delta: Option<&bedrock::ContentBlockDelta>) -> Option<&str> {
    match delta {
        Some(bedrock::ContentBlockDelta::Text(text)) => Some(text.as_str()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct GenerationChunk {
    generation: Option<String>,
}

/// Decode one InvokeModelWithResponseStream payload.
///
/// Only the `generation` field contributes text; chunks without it (stop
/// reasons, token counts) yield `None`.
pub fn parse_generation_chunk(bytes: &[u8]) -> Result<Option<StreamFragment>, GatewayError> {
    let chunk: GenerationChunk = serde_json::from_slice(bytes).map_err(|e| {
        GatewayError::MalformedResponse(format!(
            "Invalid response chunk: {}, data: {}",
            e,
            String::from_utf8_lossy(bytes)
        ))
    })?;
    Ok(chunk.generation.map(StreamFragment::from))
}

// ─── Errors ──────────────────────────────────────────────────────

/// How a rejected ConverseStream call should be handled.
#[derive(Debug)]
pub enum ConverseStreamRejection {
    /// The model does not support ConverseStream; use the fallback call.
    Unsupported(String),
    Fatal(GatewayError),
}

/// Phrases Bedrock uses in a `ValidationException` when the Converse API
/// cannot serve the selected model (matched after lowercasing and folding
/// "does not" into "doesn't").
const UNSUPPORTED_MODEL_PHRASES: &[&str] = &[
    "doesn't support the model",
    "model doesn't support converse",
    "model doesn't support the converse",
];

/// Whether a ConverseStream `ValidationException` message says the call
/// itself is unsupported for the model, as opposed to a bad parameter.
pub fn is_unsupported_operation(message: &str) -> bool {
    let normalized = message.to_ascii_lowercase().replace("does not", "doesn't");
    UNSUPPORTED_MODEL_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
}

/// Classify a ConverseStream SDK error.
pub fn classify_converse_stream_error(
    err: &SdkError<ConverseStreamError>,
) -> ConverseStreamRejection {
    match err {
        SdkError::ServiceError(service_err) => classify_service_error(service_err.err()),
        other => ConverseStreamRejection::Fatal(GatewayError::ConnectionError(format!(
            "Bedrock SDK error: {}",
            DisplayErrorContext(other)
        ))),
    }
}

/// Classify the modeled error returned by the ConverseStream operation.
///
/// Only a `ValidationException` can mean "unsupported"; every other
/// exception type is fatal.
pub fn classify_service_error(err: &ConverseStreamError) -> ConverseStreamRejection {
    match err {
        ConverseStreamError::ValidationException(e) => {
            let message = e.message().unwrap_or_default();
            if is_unsupported_operation(message) {
                ConverseStreamRejection::Unsupported(message.to_string())
            } else {
                ConverseStreamRejection::Fatal(GatewayError::RequestFailed(format!(
                    "Bedrock validation error: {}",
                    message
                )))
            }
        }
        ConverseStreamError::ModelNotReadyException(e) => ConverseStreamRejection::Fatal(
            GatewayError::ModelNotReady(e.message().unwrap_or("ModelNotReady").to_string()),
        ),
        ConverseStreamError::ThrottlingException(e) => ConverseStreamRejection::Fatal(
            GatewayError::RequestFailed(format!("Bedrock throttled: {}", e)),
        ),
        other => ConverseStreamRejection::Fatal(GatewayError::RequestFailed(format!(
            "Bedrock error: {}",
            DisplayErrorContext(other)
        ))),
    }
}

/// Convert an InvokeModelWithResponseStream SDK error to a GatewayError.
pub fn convert_invoke_error(err: &SdkError<InvokeModelWithResponseStreamError>) -> GatewayError {
    match err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            InvokeModelWithResponseStreamError::ModelNotReadyException(e) => {
                GatewayError::ModelNotReady(e.message().unwrap_or("ModelNotReady").to_string())
            }
            other => GatewayError::RequestFailed(format!(
                "Bedrock error: {}",
                DisplayErrorContext(other)
            )),
        },
        other => GatewayError::ConnectionError(format!(
            "Bedrock SDK error: {}",
            DisplayErrorContext(other)
        )),
    }
}

/// Convert an error raised while reading an event stream.
pub fn convert_stream_error<E, R>(err: &SdkError<E, R>) -> GatewayError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    GatewayError::RequestFailed(format!(
        "Bedrock stream error: {}",
        DisplayErrorContext(err)
    ))
}

// ─── JSON ↔ Document helpers ─────────────────────────────────────

/// Convert a serde_json::Value to an aws_smithy_types::Document.
pub fn json_to_document(value: &serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        serde_json::Value::String(s) => Document::String(s.clone()),
        serde_json::Value::Array(arr) => {
            Document::Array(arr.iter().map(json_to_document).collect())
        }
        serde_json::Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> InferenceParams {
        InferenceParams {
            max_tokens: 512,
            temperature: 0.25,
            top_k: 40,
        }
    }

    #[test]
    fn test_convert_conversation_wraps_each_turn() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.push_assistant("hello");
        conversation.push_user("again");

        let messages = convert_conversation(&conversation).unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role(), &bedrock::ConversationRole::User);
        assert_eq!(messages[1].role(), &bedrock::ConversationRole::Assistant);
        assert_eq!(messages[2].content().len(), 1);
        assert!(
            matches!(&messages[2].content()[0], bedrock::ContentBlock::Text(t) if t == "again")
        );
    }

    #[test]
    fn test_inference_config() {
        let config = inference_config(&params()).unwrap();
        assert_eq!(config.max_tokens(), Some(512));
        assert_eq!(config.temperature(), Some(0.25));
    }

    #[test]
    fn test_inference_config_rejects_max_tokens_above_i32() {
        let params = InferenceParams {
            max_tokens: 3_000_000_000,
            ..params()
        };
        assert!(matches!(
            inference_config(&params),
            Err(GatewayError::Other(_))
        ));
    }

    #[test]
    fn test_additional_request_fields_carry_top_k() {
        let doc = additional_request_fields(&params());
        let Document::Object(root) = doc else {
            panic!("expected object");
        };
        let Some(Document::Object(parameters)) = root.get("parameters") else {
            panic!("expected parameters object");
        };
        assert_eq!(
            parameters.get("top_k"),
            Some(&Document::Number(aws_smithy_types::Number::PosInt(40)))
        );
    }

    #[test]
    fn test_prompt_request_body() {
        let body = prompt_request_body("What is SEA-LION?", &params()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "What is SEA-LION?",
                "max_gen_len": 512,
                "temperature": 0.25
            })
        );
    }

    #[test]
    fn test_delta_text() {
        let delta = bedrock::ContentBlockDelta::Text("Hel".to_string());
        assert_eq!(delta_text(Some(&delta)), Some("Hel"));
        assert_eq!(delta_text(None), None);
    }

    #[test]
    fn test_parse_generation_chunk() {
        let fragment = parse_generation_chunk(br#"{"generation":" world","stop_reason":null}"#)
            .unwrap()
            .unwrap();
        assert_eq!(fragment.as_str(), " world");
    }

    #[test]
    fn test_parse_generation_chunk_without_text() {
        let chunk = br#"{"stop_reason":"stop","amazon-bedrock-invocationMetrics":{"outputTokenCount":12}}"#;
        assert!(parse_generation_chunk(chunk).unwrap().is_none());
    }

    #[test]
    fn test_parse_generation_chunk_invalid() {
        let err = parse_generation_chunk(b"not json").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    const UNSUPPORTED_MESSAGE: &str = "This action doesn't support the model that you provided. Try again with a supported text or chat model.";

    fn validation(message: &str) -> ConverseStreamError {
        ConverseStreamError::ValidationException(
            aws_sdk_bedrockruntime::types::error::ValidationException::builder()
                .message(message)
                .build(),
        )
    }

    #[test]
    fn test_is_unsupported_operation() {
        assert!(is_unsupported_operation(UNSUPPORTED_MESSAGE));
        assert!(is_unsupported_operation(
            "The provided model does not support the ConverseStream operation."
        ));
        assert!(is_unsupported_operation(
            "This model doesn't support Converse. Use InvokeModel instead."
        ));
    }

    #[test]
    fn test_parameter_errors_are_not_unsupported() {
        assert!(!is_unsupported_operation(
            "Malformed input request: top_k is not supported by Converse for this model"
        ));
        assert!(!is_unsupported_operation(
            "Malformed input request: temperature out of range"
        ));
        assert!(!is_unsupported_operation(
            "The maximum tokens you requested exceeds the model limit"
        ));
    }

    #[test]
    fn test_validation_exception_for_unsupported_model_falls_back() {
        let rejection = classify_service_error(&validation(UNSUPPORTED_MESSAGE));
        assert!(
            matches!(rejection, ConverseStreamRejection::Unsupported(ref m) if m == UNSUPPORTED_MESSAGE)
        );
    }

    #[test]
    fn test_other_validation_exception_is_fatal() {
        let rejection = classify_service_error(&validation("Malformed input request"));
        assert!(matches!(
            rejection,
            ConverseStreamRejection::Fatal(GatewayError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_model_not_ready_is_fatal() {
        let err = ConverseStreamError::ModelNotReadyException(
            aws_sdk_bedrockruntime::types::error::ModelNotReadyException::builder()
                .message("Model is not ready for inference")
                .build(),
        );
        let rejection = classify_service_error(&err);
        assert!(matches!(
            rejection,
            ConverseStreamRejection::Fatal(GatewayError::ModelNotReady(ref m))
                if m == "Model is not ready for inference"
        ));
    }

    #[test]
    fn test_transport_failure_is_fatal_connection_error() {
        let err: SdkError<ConverseStreamError> =
            SdkError::construction_failure("request could not be built");
        assert!(matches!(
            classify_converse_stream_error(&err),
            ConverseStreamRejection::Fatal(GatewayError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_content_block_delta_event_yields_text() {
        let event = bedrock::ConverseStreamOutput::ContentBlockDelta(
            bedrock::ContentBlockDeltaEvent::builder()
                .content_block_index(0)
                .delta(bedrock::ContentBlockDelta::Text("Hel".to_string()))
                .build()
                .unwrap(),
        );
        assert_eq!(converse_event_text(&event), Some("Hel"));
    }

    #[test]
    fn test_non_delta_events_are_ignored() {
        let start = bedrock::ConverseStreamOutput::MessageStart(
            bedrock::MessageStartEvent::builder()
                .role(bedrock::ConversationRole::Assistant)
                .build()
                .unwrap(),
        );
        let block_stop = bedrock::ConverseStreamOutput::ContentBlockStop(
            bedrock::ContentBlockStopEvent::builder()
                .content_block_index(0)
                .build()
                .unwrap(),
        );
        let stop = bedrock::ConverseStreamOutput::MessageStop(
            bedrock::MessageStopEvent::builder()
                .stop_reason(bedrock::StopReason::EndTurn)
                .build()
                .unwrap(),
        );

        assert_eq!(converse_event_text(&start), None);
        assert_eq!(converse_event_text(&block_stop), None);
        assert_eq!(converse_event_text(&stop), None);
    }

    #[test]
    fn test_json_to_document_numbers() {
        assert_eq!(
            json_to_document(&serde_json::json!(-3)),
            Document::Number(aws_smithy_types::Number::NegInt(-3))
        );
        assert_eq!(
            json_to_document(&serde_json::json!(1.5)),
            Document::Number(aws_smithy_types::Number::Float(1.5))
        );
    }
}
