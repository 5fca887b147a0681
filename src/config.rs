//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a pfedit.toml, and if present we load settings from there.
//! This provides rule switches, the file extensions to process, the directory a batch run
//! must leave alone, and the text encoding of the files.

use crate::encoding::DEFAULT_ENCODING;
use crate::error::{Error, Result};
use crate::rewrite::TransformOptions;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no config path is given.
pub const CONFIG_FILE: &str = "pfedit.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from pfedit.toml or falling back to defaults.
pub struct Config {
    #[facet(default = true)]
    /// Write each file's base name into its model management block.
    pub model_filename: bool,
    #[facet(default = false)]
    /// Add the fixed offset to the start design elevation.
    pub start_elev_offset: bool,
    #[facet(default = vec!["pf".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "DTM".to_string())]
    /// Destination subdirectory a batch run never touches.
    pub preserve_dir: String,
    #[facet(default = DEFAULT_ENCODING.to_string())]
    /// Text encoding label of the profile files.
    pub encoding: String,
}

impl Default for Config {
    /// The field defaults, as produced by an empty pfedit.toml.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    fn default() -> Self {
        facet_toml::from_str::<Self>("").expect("empty config parses to defaults")
    }
}

impl Config {
    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`, or from pfedit.toml if present.
    ///
    /// An explicitly named file must exist and parse. A missing implicit
    /// pfedit.toml yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read, or if any config
    /// file found cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                Self::from_toml(&contents)
            }
            None => match fs::read_to_string(CONFIG_FILE) {
                Ok(contents) => Self::from_toml(&contents),
                Err(_) => Ok(Self::default()),
            },
        }
    }

    #[must_use]
    /// Rule switches for the transform.
    pub fn options(&self) -> TransformOptions {
        TransformOptions {
            model_filename: self.model_filename,
            start_elev_offset: self.start_elev_offset,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
