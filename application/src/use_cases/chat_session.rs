//! Chat session use case.
//!
//! Runs the read → stream → print loop: one user line becomes one user turn
//! and one streamed assistant reply, strictly in sequence. The session ends
//! on `/bye`, an empty line or closed input; any transport failure ends it
//! with an error.

use crate::ports::console::{ConsoleInput, InputEvent, ReplySink};
use crate::ports::llm_gateway::{ChatTransport, GatewayError};
use crate::use_cases::stream_reply::{StreamReplyError, stream_reply};
use sealion_domain::Conversation;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Prompt shown before each user line.
pub const USER_PROMPT: &str = "You: ";

/// Input that ends the session (compared case-insensitively).
pub const TERMINATION_TOKEN: &str = "/bye";

/// Name printed before every assistant reply.
pub const ASSISTANT_NAME: &str = "SEA-LION";

/// Errors that end a chat session abnormally.
#[derive(Error, Debug)]
pub enum ChatSessionError {
    #[error("Failed to read input: {0}")]
    Input(std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(std::io::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Reply(#[from] StreamReplyError),
}

impl ChatSessionError {
    pub fn is_model_not_ready(&self) -> bool {
        match self {
            ChatSessionError::Gateway(e) => e.is_model_not_ready(),
            ChatSessionError::Reply(e) => e.is_model_not_ready(),
            _ => false,
        }
    }
}

/// How a session that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user typed the termination token or an empty line.
    Farewell,
    /// Input was closed or interrupted at the prompt.
    InputClosed,
}

/// Whether a trimmed input line ends the session.
pub fn is_termination(line: &str) -> bool {
    line.is_empty() || line.eq_ignore_ascii_case(TERMINATION_TOKEN)
}

/// Use case for an interactive chat session.
///
/// Owns the [`Conversation`] for the lifetime of the session and lends it to
/// the transport and the normalizer one turn at a time.
pub struct ChatSessionUseCase {
    transport: Arc<dyn ChatTransport>,
    conversation: Conversation,
}

impl ChatSessionUseCase {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run until the user leaves or a turn fails.
    pub async fn run(
        &mut self,
        input: &mut dyn ConsoleInput,
        sink: &mut dyn ReplySink,
    ) -> Result<SessionOutcome, ChatSessionError> {
        info!(transport = self.transport.name(), "Chat session started");

        loop {
            let line = match input.read_line(USER_PROMPT).map_err(ChatSessionError::Input)? {
                InputEvent::Line(line) => line,
                InputEvent::Interrupted | InputEvent::Eof => {
                    self.farewell(sink)?;
                    return Ok(SessionOutcome::InputClosed);
                }
            };

            let line = line.trim();
            if is_termination(line) {
                self.farewell(sink)?;
                return Ok(SessionOutcome::Farewell);
            }

            self.handle_turn(line, sink).await?;
        }
    }

    /// Append the user's line and stream one assistant reply.
    pub async fn handle_turn(
        &mut self,
        message: &str,
        sink: &mut dyn ReplySink,
    ) -> Result<(), ChatSessionError> {
        self.conversation.push_user(message);
        debug!(turns = self.conversation.len(), "User turn appended");

        sink.begin_reply(&format!("{}: ", ASSISTANT_NAME))
            .map_err(ChatSessionError::Output)?;

        let mut source = self.transport.open_stream(&self.conversation).await?;
        let reply = stream_reply(source.as_mut(), sink, &mut self.conversation).await?;

        debug!(
            chars = reply.text().chars().count(),
            turns = self.conversation.len(),
            "Assistant turn appended"
        );
        Ok(())
    }

    fn farewell(&self, sink: &mut dyn ReplySink) -> Result<(), ChatSessionError> {
        sink.notice(&format!("{}: Goodbye!", ASSISTANT_NAME))
            .map_err(ChatSessionError::Output)
    }
}
