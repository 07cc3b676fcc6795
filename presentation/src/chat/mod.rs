//! Interactive chat input
//!
//! Reads user lines with reedline on a terminal and with plain line reads
//! when stdin is piped.

mod repl;

pub use repl::{ChatPrompt, LineInput, ReedlineInput, open_console_input};
