//! Console ports
//!
//! [`ConsoleInput`] reads what the user types; [`ReplySink`] displays what
//! the session and the model produce. Implementations live in the
//! presentation layer.

use std::io;

/// Result of reading one line from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D / closed input.
    Eof,
}

/// Line-oriented user input.
pub trait ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
}

/// Display sink for streamed replies and session notices.
pub trait ReplySink {
    /// Print the assistant label that precedes a reply.
    fn begin_reply(&mut self, label: &str) -> io::Result<()>;

    /// Print one cleaned fragment immediately (no buffering delay).
    fn write_fragment(&mut self, text: &str) -> io::Result<()>;

    /// Terminate the reply line.
    fn end_reply(&mut self) -> io::Result<()>;

    /// Print a full line outside of a reply (e.g. the farewell).
    fn notice(&mut self, line: &str) -> io::Result<()>;
}
