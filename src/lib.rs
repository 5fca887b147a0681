//! pfedit: block-level rewriting of road/rail design profile (`.pf`) files.
//!
//! A profile file is a sequence of `#Title` blocks. pfedit scans the blocks,
//! rebuilds the ones named in a mutation table (plus a few blocks with their own
//! rules) and copies everything else through byte for byte.

pub mod batch;
pub mod block;
pub mod config;
pub mod encoding;
pub mod error;
pub mod formats;
pub mod mutation;
pub mod render;
pub mod rewrite;
pub mod rules;
pub mod scanner;
pub mod tokens;

pub use error::{Error, Result};
pub use mutation::MutationTable;
pub use rewrite::{rewrite_file, transform, transform_text, TransformOptions, TransformOutput};
