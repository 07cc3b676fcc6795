//! Streaming response normalizer.
//!
//! Pulls fragments from a [`FragmentSource`], forwards the cleaned text of
//! every fragment (empty or not) to a [`ReplySink`] as it arrives and appends the assembled reply to the
//! conversation once the stream is exhausted. Every transport feeds this
//! same routine.

use crate::ports::console::ReplySink;
use crate::ports::llm_gateway::{FragmentSource, GatewayError};
use sealion_domain::{AssembledReply, Conversation, ReplyAssembler};
use thiserror::Error;
use tracing::debug;

/// Errors that abort a streamed reply.
///
/// When either occurs nothing has been appended to the conversation.
#[derive(Error, Debug)]
pub enum StreamReplyError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Failed to write reply: {0}")]
    Output(#[from] std::io::Error),
}

impl StreamReplyError {
    pub fn is_model_not_ready(&self) -> bool {
        matches!(self, StreamReplyError::Gateway(e) if e.is_model_not_ready())
    }
}

/// Consume `source` to completion and record the reply.
///
/// An all-whitespace reply still produces an (empty) assistant turn.
pub async fn stream_reply(
    source: &mut dyn FragmentSource,
    sink: &mut dyn ReplySink,
    conversation: &mut Conversation,
) -> Result<AssembledReply, StreamReplyError> {
    let mut assembler = ReplyAssembler::new();

    while let Some(fragment) = source.next_fragment().await? {
        let text = assembler.push(&fragment);
        sink.write_fragment(text)?;
    }
    sink.end_reply()?;

    debug!(
        fragments = assembler.fragment_count(),
        "Reply stream exhausted"
    );

    let reply = assembler.finish();
    conversation.push_assistant(reply.text());
    Ok(reply)
}
