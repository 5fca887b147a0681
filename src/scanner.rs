//! Block scanner: splits a profile file's lines into titled line ranges.

use crate::block::{Block, BlockKind};
use crate::formats::Format;

/// Title carried by a line, if it opens a block.
///
/// The line must start (after leading whitespace) with the block marker and
/// have a non-empty remainder; the title is the first word of that remainder.
#[must_use]
pub fn block_title<'a>(line: &'a str, format: &impl Format) -> Option<&'a str> {
    let body = line.trim_start().strip_prefix(format.block_marker())?;
    body.split_whitespace().next()
}

/// Scan lines into contiguous blocks in source order.
///
/// Each block ends on the line before the next title line; the last block ends
/// on the final line. Lines before the first title line belong to no block.
/// Marker lines with nothing after the marker open no block.
#[must_use]
pub fn scan_blocks<S: AsRef<str>>(lines: &[S], format: &impl Format) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(title) = block_title(line.as_ref(), format) {
            let line_start = i + 1;
            if let Some(prev) = blocks.last_mut() {
                prev.line_end = line_start - 1;
            }
            blocks.push(Block {
                title: title.to_string(),
                kind: BlockKind::from_title(title),
                line_start,
                line_end: lines.len(),
            });
        }
    }

    blocks
}

#[cfg(test)]
#[path = "tests/scanner.rs"]
mod tests;
