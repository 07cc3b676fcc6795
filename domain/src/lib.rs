//! Domain layer for sealion-chat
//!
//! This crate contains the conversation model and the reply assembly rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation**: append-only list of user/assistant turns
//! - **Stream fragment**: one incremental unit of generated text
//! - **Assembled reply**: cleaned fragments concatenated in arrival order

pub mod providers;
pub mod session;

// Re-export commonly used types
pub use providers::{ChatConfig, InferenceParams, TransportKind};
pub use session::{
    entities::{Conversation, ConversationTurn, Role},
    response::{AssembledReply, ReplyAssembler},
    stream::{StreamFragment, strip_line_breaks},
};
