//! Presentation layer for sealion-chat
//!
//! This crate contains the CLI definition, console input and the
//! streaming reply output.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatPrompt, LineInput, ReedlineInput, open_console_input};
pub use cli::commands::Cli;
pub use output::console::{ConsoleReplySink, MODEL_NOTICE, WELCOME};
