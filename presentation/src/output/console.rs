//! Console output for streamed replies

use colored::Colorize;
use sealion_application::ReplySink;
use std::io::{self, IsTerminal, Stdout, Write};

/// First banner line, shown once at startup.
pub const MODEL_NOTICE: &str = "This demo application is built for the imported SEA-LION models (https://sea-lion.ai/our-models/) with Llama architecture.";

/// Second banner line.
pub const WELCOME: &str = "Welcome! Type your message or /bye to end.";

/// Writes replies to a terminal (or any writer), flushing after every
/// fragment so text appears as it streams in.
pub struct ConsoleReplySink<W: Write> {
    writer: W,
    color: bool,
}

impl ConsoleReplySink<Stdout> {
    /// Sink on stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let color = stdout.is_terminal();
        Self::new(stdout, color)
    }
}

impl<W: Write> ConsoleReplySink<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    /// Print the startup banner.
    pub fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{}", MODEL_NOTICE)?;
        writeln!(self.writer, "{}", WELCOME)?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn label(&self, label: &str) -> String {
        if self.color {
            label.cyan().bold().to_string()
        } else {
            label.to_string()
        }
    }
}

impl<W: Write> ReplySink for ConsoleReplySink<W> {
    fn begin_reply(&mut self, label: &str) -> io::Result<()> {
        let label = self.label(label);
        write!(self.writer, "{}", label)?;
        self.writer.flush()
    }

    fn write_fragment(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    fn end_reply(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn notice(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}
