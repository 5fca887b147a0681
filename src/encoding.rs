//! Lossy text codec for legacy-encoded profile files.
//!
//! Profile files are usually GBK. Files drift between encodings in practice,
//! so malformed input bytes and unmappable output characters are dropped, and
//! the number dropped is reported so callers can surface data loss.

use crate::error::{Error, Result};
use encoding_rs::{DecoderResult, Encoding, EncoderResult};

/// Encoding label used when none is configured.
pub const DEFAULT_ENCODING: &str = "gbk";

#[derive(Debug)]
/// Decoded text plus the number of malformed byte sequences dropped.
pub struct Decoded {
    /// Text with malformed sequences removed.
    pub text: String,
    /// Count of malformed sequences dropped.
    pub dropped: usize,
}

#[derive(Debug)]
/// Encoded bytes plus the number of unmappable characters dropped.
pub struct Encoded {
    /// Bytes in the target encoding.
    pub bytes: Vec<u8>,
    /// Count of characters the encoding could not represent.
    pub dropped: usize,
}

/// Resolve a WHATWG encoding label such as `gbk` or `utf-8`.
///
/// # Errors
///
/// Returns an error if the label is not recognised.
pub fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

#[must_use]
/// Decode `bytes`, dropping malformed sequences. No BOM sniffing is done.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Decoded {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len() * 3);
    let mut text = String::with_capacity(capacity);
    let mut src = bytes;
    let mut dropped = 0;

    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(src, &mut text, true);
        src = &src[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => text.reserve(src.len() * 3 + 16),
            DecoderResult::Malformed(_, _) => dropped += 1,
        }
    }

    Decoded { text, dropped }
}

#[must_use]
/// Encode `text`, dropping characters the encoding cannot represent.
pub fn encode(text: &str, encoding: &'static Encoding) -> Encoded {
    let mut encoder = encoding.new_encoder();
    let capacity = encoder
        .max_buffer_length_from_utf8_without_replacement(text.len())
        .unwrap_or(text.len() * 2);
    let mut bytes = Vec::with_capacity(capacity);
    let mut src = text;
    let mut dropped = 0;

    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(src, &mut bytes, true);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => bytes.reserve(src.len() * 2 + 16),
            EncoderResult::Unmappable(_) => dropped += 1,
        }
    }

    Encoded { bytes, dropped }
}

#[cfg(test)]
#[path = "tests/encoding.rs"]
mod tests;
