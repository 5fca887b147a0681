//! The mutation table maps block titles to index-addressed token overwrites.
//!
//! Tables are validated when built, so the rewrite path only ever looks up
//! titles that could actually appear in a scanned file and writes values that
//! cannot break the line structure of the output.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Highest token index a table may address.
pub const MAX_TOKEN_INDEX: usize = 4096;

/// Wire shape of a table: `{"title": {"index": "value"}}`.
type RawTable = BTreeMap<String, BTreeMap<usize, String>>;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Replacement of the token at `index` with `value`.
pub struct Overwrite {
    /// Token position within the block.
    pub index: usize,
    /// New token text.
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "RawTable", into = "RawTable")]
/// Validated overwrites grouped by block title.
pub struct MutationTable {
    rules: BTreeMap<String, Vec<Overwrite>>,
}

impl MutationTable {
    /// Build a table from `(title, [(index, value)])` entries.
    ///
    /// Overwrites for a title keep the order given. A title repeated across
    /// entries appends to the earlier list.
    ///
    /// # Errors
    ///
    /// Returns an error if a title is empty or contains whitespace, if an
    /// index exceeds [`MAX_TOKEN_INDEX`], or if a value contains a line break.
    pub fn new<T, I, V>(entries: impl IntoIterator<Item = (T, I)>) -> Result<Self>
    where
        T: Into<String>,
        I: IntoIterator<Item = (usize, V)>,
        V: Into<String>,
    {
        let mut rules: BTreeMap<String, Vec<Overwrite>> = BTreeMap::new();

        for (title, overwrites) in entries {
            let title = title.into();
            if title.is_empty() || title.chars().any(char::is_whitespace) {
                return Err(Error::MutationTable(format!(
                    "title {title:?} can never match a block title"
                )));
            }
            let list = rules.entry(title.clone()).or_default();
            for (index, value) in overwrites {
                if index > MAX_TOKEN_INDEX {
                    return Err(Error::MutationTable(format!(
                        "index {index} for {title} exceeds {MAX_TOKEN_INDEX}"
                    )));
                }
                let value = value.into();
                if value.contains(['\n', '\r']) {
                    return Err(Error::MutationTable(format!(
                        "value for {title}[{index}] contains a line break"
                    )));
                }
                list.push(Overwrite { index, value });
            }
        }

        Ok(Self { rules })
    }

    /// The table applied to every file in a default batch run.
    ///
    /// # Panics
    ///
    /// Panics if the built-in entries fail validation.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            ("绘图比例", vec![(1, "1000"), (2, "200")]),
            ("断链", vec![(3, "\"\""), (11, "\"\"")]),
            ("模型管理", vec![(5, "改移道路")]),
            ("数模", vec![(0, "2000地形图总和-8号色")]),
            ("五线谱", vec![(0, "复杂的改移公道路纵断面")]),
        ])
        .expect("built-in mutation table is valid")
    }

    /// Parse a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    #[must_use]
    /// Overwrites registered for `title`.
    pub fn get(&self, title: &str) -> Option<&[Overwrite]> {
        self.rules.get(title).map(Vec::as_slice)
    }

    #[must_use]
    /// Whether `title` has an entry, even an empty one.
    pub fn contains(&self, title: &str) -> bool {
        self.rules.contains_key(title)
    }

    #[must_use]
    /// Number of titles in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    /// Whether the table has no titles.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<RawTable> for MutationTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<MutationTable> for RawTable {
    fn from(table: MutationTable) -> Self {
        table
            .rules
            .into_iter()
            .map(|(title, list)| {
                let map = list.into_iter().map(|o| (o.index, o.value)).collect();
                (title, map)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/mutation.rs"]
mod tests;
