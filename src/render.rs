//! Serialization of rewritten blocks back into profile lines.

use crate::block::{Block, BlockKind};
use crate::formats::Format;
use crate::tokens::Tokens;

/// Maximum tokens per continuation line in a disconnection block.
pub const DISCONNECTION_WRAP: usize = 7;

/// Render a rewritten block as lines (without terminators).
///
/// Disconnection blocks keep their first token on the title line and wrap the
/// rest seven per line. Model management blocks put all tokens on a single
/// line after a bare title line. Every other block is one line.
#[must_use]
pub fn render_block(block: &Block, tokens: &Tokens, format: &impl Format) -> Vec<String> {
    let header = format!("{}{}", format.block_marker(), block.title);
    let words = tokens.as_slice();

    match block.kind {
        BlockKind::Disconnection => {
            let Some((first, rest)) = words.split_first() else {
                return vec![header];
            };
            let mut out = vec![format!("{header} {first}")];
            out.extend(rest.chunks(DISCONNECTION_WRAP).map(|group| group.join(" ")));
            out
        }
        BlockKind::ModelManagement => {
            if words.is_empty() {
                vec![header]
            } else {
                vec![header, tokens.join()]
            }
        }
        _ => {
            if words.is_empty() {
                vec![header]
            } else {
                vec![format!("{header} {}", tokens.join())]
            }
        }
    }
}

/// Comment out every line of a block, keeping its text after the comment marker.
#[must_use]
pub fn comment_out<S: AsRef<str>>(lines: &[S], format: &impl Format) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let text = line.as_ref().trim_end_matches(['\r', '\n']);
            format!("{}{text}", format.comment_marker())
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
