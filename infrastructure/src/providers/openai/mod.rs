//! OpenAI-compatible chat-completions provider
//!
//! Streams replies from `POST {base_url}/chat/completions` as server-sent
//! events. Used with the `--api` flag against an OpenAI-compatible gateway
//! in front of the Bedrock endpoint.

mod transport;
mod types;

pub use transport::{ChatCompletionsTransport, SseFragmentSource};
pub use types::{SseData, parse_event_data};
