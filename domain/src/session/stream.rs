//! Streaming fragments for LLM responses.
//!
//! A [`StreamFragment`] is the unit a backend-specific stream yields. The
//! only ordering guarantee is arrival order, so fragments must be
//! concatenated exactly as received.

/// One incremental unit of generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamFragment(String);

impl StreamFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// An empty fragment (e.g. a chunk whose delta carried no content).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment text with every `\n` and `\r` removed.
    pub fn cleaned(&self) -> String {
        strip_line_breaks(&self.0)
    }
}

impl From<String> for StreamFragment {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for StreamFragment {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Remove newline and carriage-return characters from `text`.
pub fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}
