//! Positional token sequences extracted from a block's lines.
//!
//! Tokens are addressed by index in mutation rules, so writes past the end
//! pad the sequence with empty strings instead of failing.

use crate::block::Block;
use crate::formats::Format;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Flattened, whitespace-separated words of a block, title word excluded.
pub struct Tokens(Vec<String>);

impl Tokens {
    #[must_use]
    /// Wrap an existing list of words.
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    #[must_use]
    /// Number of tokens, including padding.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    /// Whether no tokens are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    /// Token at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Extend with empty strings until at least `len` tokens exist.
    pub fn pad_to(&mut self, len: usize) {
        if self.0.len() < len {
            self.0.resize(len, String::new());
        }
    }

    /// Overwrite the token at `index`, padding first when it lies past the end.
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        self.pad_to(index.saturating_add(1));
        self.0[index] = value.into();
    }

    #[must_use]
    /// Borrow the tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    /// Space-joined tokens.
    pub fn join(&self) -> String {
        self.0.join(" ")
    }
}

/// Extract the tokens of `block` from the full file's `lines`.
///
/// Everything after the comment marker is dropped on every line. On marker
/// lines the first word (the title) is skipped; other lines contribute every
/// word, which is how values continued over several lines are flattened.
#[must_use]
pub fn extract_tokens<S: AsRef<str>>(block: &Block, lines: &[S], format: &impl Format) -> Tokens {
    let mut words = Vec::new();
    let span = lines
        .get(block.line_start.saturating_sub(1)..block.line_end.min(lines.len()))
        .unwrap_or_default();

    for line in span {
        let line = line.as_ref();
        let code = match line.find(format.comment_marker()) {
            Some(pos) => &line[..pos],
            None => line,
        };
        let code = code.trim_start();
        if let Some(rest) = code.strip_prefix(format.block_marker()) {
            words.extend(rest.split_whitespace().skip(1).map(str::to_string));
        } else {
            words.extend(code.split_whitespace().map(str::to_string));
        }
    }

    Tokens(words)
}

#[cfg(test)]
#[path = "tests/tokens.rs"]
mod tests;
