//! Token rewrite rules applied to matched blocks.
//!
//! Every rule degrades to leaving the tokens as they are rather than failing:
//! unparsable numbers stay put, short sequences are padded, and station labels
//! without a recognisable pattern are rebuilt from whatever follows the last `K`.

use crate::mutation::Overwrite;
use crate::tokens::Tokens;
use regex::Regex;
use std::sync::LazyLock;

/// Amount added to the start design elevation when the offset is enabled.
pub const START_ELEVATION_OFFSET: f64 = 0.3;

/// Token count below which a disconnection block is reported as incomplete.
pub const MIN_DISCONNECTION_TOKENS: usize = 15;

/// Station label positions in a disconnection block and their road prefixes.
pub const DISCONNECTION_LABELS: [(usize, &str); 2] = [(4, "改移道路起点道"), (10, "改移道路终点道")];

static DECIMAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+").expect("valid decimal pattern"));

static STATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"K\d+\+\d+").expect("valid station pattern"));

#[derive(Clone, Debug, PartialEq, Eq)]
/// Non-fatal finding raised while rewriting a block.
pub struct Diagnostic {
    /// Title of the block concerned.
    pub title: String,
    /// Title line of the block (1-based).
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

/// Shortest round-trip text for `value`, in the `1e+16` / `1.5e-05` / `nan`
/// shape profile tools expect.
fn format_elevation(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Add [`START_ELEVATION_OFFSET`] to the first token when it is a number.
///
/// Integral results keep a trailing `.0`. Non-numeric or missing tokens are
/// left untouched.
pub fn offset_start_elevation(tokens: &mut Tokens) {
    let Some(first) = tokens.get(0) else {
        return;
    };
    if let Ok(value) = first.parse::<f64>() {
        let shifted = value + START_ELEVATION_OFFSET;
        tokens.set(0, format_elevation(shifted));
    }
}

/// Apply static overwrites in order, padding as needed.
pub fn apply_overwrites(tokens: &mut Tokens, overwrites: &[Overwrite]) {
    for overwrite in overwrites {
        tokens.set(overwrite.index, overwrite.value.as_str());
    }
}

/// Put the file's base name in the second token, padding to two tokens.
pub fn inject_model_filename(tokens: &mut Tokens, base_name: &str) {
    tokens.set(1, base_name);
}

/// Rebuild a quoted station label from a raw disconnection token.
///
/// Decimal fractions are dropped first. A `K<digits>+<digits>` match is kept
/// as is; otherwise the text after the last `K` is used, re-prefixed with `K`.
#[must_use]
pub fn station_label(raw: &str, label: &str) -> String {
    let stripped = DECIMAL_SUFFIX.replace_all(raw, "");
    let stripped: &str = &stripped;
    if let Some(m) = STATION.find(stripped) {
        return format!("\"{label}{}\"", m.as_str());
    }
    let rest = stripped.rfind('K').map_or(stripped, |pos| &stripped[pos + 1..]);
    format!("\"{label}K{rest}\"")
}

/// Rewrite the start and end station labels of a disconnection block.
pub fn rebuild_station_labels(tokens: &mut Tokens) {
    for (index, label) in DISCONNECTION_LABELS {
        tokens.pad_to(index + 1);
        let raw = tokens.get(index).unwrap_or_default();
        let rebuilt = station_label(raw, label);
        tokens.set(index, rebuilt);
    }
}

#[cfg(test)]
#[path = "tests/rules.rs"]
mod tests;
