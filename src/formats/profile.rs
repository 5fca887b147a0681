//! Profile (`.pf`) format used by road/rail design software.
//!
//! Blocks open with `#Title` and inline comments start with `//`.

use crate::formats::Format;

/// Markers of the `.pf` profile dialect.
pub struct ProfileFormat;

impl Format for ProfileFormat {
    fn block_marker(&self) -> char {
        '#'
    }

    fn comment_marker(&self) -> &'static str {
        "//"
    }
}
