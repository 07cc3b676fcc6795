//! Application layer for sealion-chat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod fallback;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use fallback::FallbackTransport;
pub use ports::{
    console::{ConsoleInput, InputEvent, ReplySink},
    llm_gateway::{ChatTransport, FragmentSource, GatewayError, StreamAttempt, StreamingCall},
};
pub use use_cases::chat_session::{
    ASSISTANT_NAME, ChatSessionError, ChatSessionUseCase, SessionOutcome, TERMINATION_TOKEN,
    USER_PROMPT, is_termination,
};
pub use use_cases::stream_reply::{StreamReplyError, stream_reply};
