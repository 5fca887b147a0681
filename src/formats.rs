//! Format trait and implementations for block-structured text dialects.
//!
//! This module defines the `Format` trait which abstracts over the markers a
//! dialect uses to open a block and to start an inline comment, so that the
//! scanner and tokenizer stay independent of any one file type.

pub mod profile;

/// Lexical markers of a block-structured line format.
pub trait Format {
    /// Character that opens a titled block when it leads a line.
    fn block_marker(&self) -> char;
    /// Sequence after which the rest of a line is a comment.
    fn comment_marker(&self) -> &str;
}
