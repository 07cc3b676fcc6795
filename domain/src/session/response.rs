//! Reply assembly.
//!
//! [`ReplyAssembler`] is the accumulator behind the streaming normalizer:
//! every fragment is cleaned, the cleaned text is handed back for immediate
//! display, and the concatenation becomes the [`AssembledReply`].

use super::stream::StreamFragment;

/// The full text of one assistant turn, assembled from cleaned fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledReply {
    text: String,
}

impl AssembledReply {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Accumulates cleaned fragments in arrival order.
#[derive(Debug, Default)]
pub struct ReplyAssembler {
    buffer: String,
    fragments: usize,
}

impl ReplyAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean `fragment`, append it and return the cleaned text.
    ///
    /// A fragment holding only line breaks yields `""` and leaves the
    /// buffer unchanged.
    pub fn push(&mut self, fragment: &StreamFragment) -> &str {
        self.fragments += 1;
        let start = self.buffer.len();
        self.buffer.push_str(&fragment.cleaned());
        &self.buffer[start..]
    }

    /// Number of fragments seen so far, including ones that cleaned to nothing.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn finish(self) -> AssembledReply {
        AssembledReply { text: self.buffer }
    }
}
