//! The rewriter splices regenerated blocks into a file's original lines.
//!
//! This module defines the transformation that a mutation table manifests as
//! actual edits. The in-memory [`transform`] walks the line buffer block by
//! block, copying untouched ranges verbatim; [`rewrite_file`] wraps it with
//! decoding, encoding and an atomic write back to the same path.

use crate::block::{Block, BlockKind};
use crate::encoding;
use crate::error::{Error, Result};
use crate::formats::profile::ProfileFormat;
use crate::mutation::MutationTable;
use crate::render::{comment_out, render_block};
use crate::rules::{self, Diagnostic, MIN_DISCONNECTION_TOKENS};
use crate::scanner::scan_blocks;
use crate::tokens::extract_tokens;
use encoding_rs::Encoding;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Feature switches for the optional rules.
pub struct TransformOptions {
    /// Write the file's base name into the model management block.
    pub model_filename: bool,
    /// Add the fixed offset to the start design elevation.
    pub start_elev_offset: bool,
}

#[derive(Debug, Default)]
/// Result of transforming one file's lines.
pub struct TransformOutput {
    /// Output lines, each carrying its own terminator where the input did.
    pub lines: Vec<String>,
    /// Number of blocks regenerated or commented out.
    pub rewritten: usize,
    /// Advisory findings raised along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformOutput {
    #[must_use]
    /// Concatenate the output lines into file text.
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

#[derive(Debug)]
/// Summary of rewriting one file on disk.
pub struct FileReport {
    /// File that was rewritten.
    pub path: PathBuf,
    /// Number of blocks regenerated or commented out.
    pub rewritten: usize,
    /// Advisory findings raised along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Malformed byte sequences dropped while decoding.
    pub decode_dropped: usize,
    /// Unmappable characters dropped while encoding.
    pub encode_dropped: usize,
}

/// Terminator used for regenerated lines: the first one found in the input.
fn line_ending<S: AsRef<str>>(lines: &[S]) -> &'static str {
    for line in lines {
        let line: &str = line.as_ref();
        if line.ends_with("\r\n") {
            return "\r\n";
        }
        if line.ends_with('\n') {
            return "\n";
        }
    }
    "\n"
}

/// Whether a block's tokens are rebuilt under the given table and options.
fn is_targeted(block: &Block, table: &MutationTable, options: TransformOptions) -> bool {
    if table.contains(&block.title) {
        return true;
    }
    match block.kind {
        BlockKind::Disconnection => true,
        BlockKind::StartElevation => options.start_elev_offset,
        BlockKind::ModelManagement => options.model_filename,
        BlockKind::TerrainProfile | BlockKind::Plain => false,
    }
}

/// Tokenize, mutate and re-render one targeted block.
fn rewrite_block<S: AsRef<str>>(
    block: &Block,
    lines: &[S],
    table: &MutationTable,
    options: TransformOptions,
    base_name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let format = ProfileFormat;
    let mut tokens = extract_tokens(block, lines, &format);
    let extracted = tokens.len();

    if block.kind == BlockKind::StartElevation && options.start_elev_offset {
        rules::offset_start_elevation(&mut tokens);
    }
    if let Some(overwrites) = table.get(&block.title) {
        rules::apply_overwrites(&mut tokens, overwrites);
    }
    if block.kind == BlockKind::ModelManagement && options.model_filename {
        rules::inject_model_filename(&mut tokens, base_name);
    }
    if block.kind == BlockKind::Disconnection {
        if extracted < MIN_DISCONNECTION_TOKENS {
            warn!(
                file = base_name,
                line = block.line_start,
                count = extracted,
                "missing disconnection elements"
            );
            diagnostics.push(Diagnostic {
                title: block.title.clone(),
                line: block.line_start,
                message: format!(
                    "insufficient disconnection elements: {extracted} (expected at least {MIN_DISCONNECTION_TOKENS})"
                ),
            });
        }
        rules::rebuild_station_labels(&mut tokens);
    }

    debug!(
        title = %block.title,
        line = block.line_start,
        tokens = tokens.len(),
        "rewrote block"
    );
    render_block(block, &tokens, &format)
}

/// Rewrite the blocks of a file held as lines.
///
/// `lines` should keep their terminators (as produced by
/// `str::split_inclusive('\n')`); untouched lines are copied byte for byte and
/// regenerated lines use the first terminator seen in the input. `base_name`
/// is the file name without directory or extension.
#[must_use]
pub fn transform<S: AsRef<str>>(
    lines: &[S],
    table: &MutationTable,
    options: TransformOptions,
    base_name: &str,
) -> TransformOutput {
    let format = ProfileFormat;
    let eol = line_ending(lines);
    let blocks = scan_blocks(lines, &format);
    let mut out = TransformOutput::default();
    let mut cur = 1;

    let verbatim = |out: &mut TransformOutput, from: usize, to: usize| {
        out.lines
            .extend(lines[from - 1..to].iter().map(|l| l.as_ref().to_string()));
    };

    for block in &blocks {
        if cur < block.line_start {
            verbatim(&mut out, cur, block.line_start - 1);
        }
        let span = &lines[block.line_start - 1..block.line_end];

        let generated = if block.kind == BlockKind::TerrainProfile {
            Some(comment_out(span, &format))
        } else if is_targeted(block, table, options) {
            Some(rewrite_block(
                block,
                lines,
                table,
                options,
                base_name,
                &mut out.diagnostics,
            ))
        } else {
            None
        };

        match generated {
            Some(new_lines) => {
                out.rewritten += 1;
                out.lines
                    .extend(new_lines.into_iter().map(|l| format!("{l}{eol}")));
            }
            None => verbatim(&mut out, block.line_start, block.line_end),
        }
        cur = block.line_end + 1;
    }

    if cur <= lines.len() {
        verbatim(&mut out, cur, lines.len());
    }

    out
}

#[must_use]
/// Split text into lines that keep their terminators and run [`transform`].
pub fn transform_text(
    text: &str,
    table: &MutationTable,
    options: TransformOptions,
    base_name: &str,
) -> TransformOutput {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    transform(&lines, table, options, base_name)
}

/// Replace `path` with `bytes` via a temporary file in the same directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Rewrite a profile file in place.
///
/// The file is decoded with `encoding`, transformed with its stem as the base
/// name, re-encoded and written back atomically. Decode and encode losses are
/// logged and reported, never fatal.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the result cannot be written.
pub fn rewrite_file(
    path: &Path,
    table: &MutationTable,
    options: TransformOptions,
    encoding: &'static Encoding,
) -> Result<FileReport> {
    let raw = fs::read(path).map_err(|e| Error::io(path, e))?;
    let decoded = encoding::decode(&raw, encoding);
    if decoded.dropped > 0 {
        warn!(
            path = %path.display(),
            dropped = decoded.dropped,
            encoding = encoding.name(),
            "dropped malformed bytes while decoding"
        );
    }

    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = transform_text(&decoded.text, table, options, &base_name);

    let encoded = encoding::encode(&output.text(), encoding);
    if encoded.dropped > 0 {
        warn!(
            path = %path.display(),
            dropped = encoded.dropped,
            encoding = encoding.name(),
            "dropped unmappable characters while encoding"
        );
    }
    write_atomic(path, &encoded.bytes)?;
    info!(path = %path.display(), blocks = output.rewritten, "Modified");

    Ok(FileReport {
        path: path.to_path_buf(),
        rewritten: output.rewritten,
        diagnostics: output.diagnostics,
        decode_dropped: decoded.dropped,
        encode_dropped: encoded.dropped,
    })
}

#[cfg(test)]
#[path = "tests/rewrite.rs"]
mod tests;
