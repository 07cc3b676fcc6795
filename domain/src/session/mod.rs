//! Conversation session domain.
//!
//! - [`entities::Conversation`] - the append-only list of turns for one process run
//! - [`stream::StreamFragment`] - one incremental unit of generated text
//! - [`response::ReplyAssembler`] - accumulates cleaned fragments into an [`response::AssembledReply`]

pub mod entities;
pub mod response;
pub mod stream;
