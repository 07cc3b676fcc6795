//! Console input for the chat loop

use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};
use sealion_application::{ConsoleInput, InputEvent};
use std::borrow::Cow;
use std::io::{self, BufRead, IsTerminal, Write};

/// Prompt that renders a fixed label such as `You: `.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    label: String,
}

impl ChatPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Prompt for ChatPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", prefix, history_search.term))
    }
}

/// Line editor input for interactive terminals.
///
/// History is kept in memory for the lifetime of the session only.
pub struct ReedlineInput {
    editor: Reedline,
}

impl ReedlineInput {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }
}

impl Default for ReedlineInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInput for ReedlineInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let prompt = ChatPrompt::new(prompt);
        match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Ok(InputEvent::Line(line)),
            Signal::CtrlC => Ok(InputEvent::Interrupted),
            Signal::CtrlD => Ok(InputEvent::Eof),
        }
    }
}

/// Plain line reader for piped input.
pub struct LineInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> ConsoleInput for LineInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(InputEvent::Eof);
        }
        let line = line.trim_end_matches(['\n', '\r']);
        Ok(InputEvent::Line(line.to_string()))
    }
}

/// Pick the line editor on a terminal, plain reads otherwise.
pub fn open_console_input() -> Box<dyn ConsoleInput> {
    if io::stdin().is_terminal() {
        Box::new(ReedlineInput::new())
    } else {
        Box::new(LineInput::new(io::stdin().lock(), io::stdout()))
    }
}
