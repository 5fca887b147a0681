//! Block representation for scanned profile files.
//!
//! A block is a titled, contiguous run of lines opened by a marker line such
//! as `#断链`. Blocks carry 1-based inclusive line coordinates so the rewriter
//! can splice regenerated content into the original line buffer.

use serde::Serialize;

/// Title of the terrain-profile block, which is commented out wholesale.
pub const TERRAIN_PROFILE_TITLE: &str = "地面线";
/// Title of the start design elevation block.
pub const START_ELEVATION_TITLE: &str = "起点设计标高";
/// Title of the model management block.
pub const MODEL_MANAGEMENT_TITLE: &str = "模型管理";
/// Title of the disconnection (broken chainage) block.
pub const DISCONNECTION_TITLE: &str = "断链";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Block kinds that carry their own rewrite and serialization rules.
pub enum BlockKind {
    /// `地面线`: every line is commented out, never tokenized.
    TerrainProfile,
    /// `起点设计标高`: first token may receive the elevation offset.
    StartElevation,
    /// `模型管理`: second token may receive the file's base name.
    ModelManagement,
    /// `断链`: station labels are rebuilt and tokens wrapped seven per line.
    Disconnection,
    /// Any other title; only the mutation table applies.
    Plain,
}

impl BlockKind {
    #[must_use]
    /// Classify a scanned title.
    pub fn from_title(title: &str) -> Self {
        match title {
            TERRAIN_PROFILE_TITLE => Self::TerrainProfile,
            START_ELEVATION_TITLE => Self::StartElevation,
            MODEL_MANAGEMENT_TITLE => Self::ModelManagement,
            DISCONNECTION_TITLE => Self::Disconnection,
            _ => Self::Plain,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Titled line range within a profile file.
pub struct Block {
    /// First word after the block marker on the title line.
    pub title: String,
    /// Rule set selected by the title.
    pub kind: BlockKind,
    /// Line of the title (1-based).
    pub line_start: usize,
    /// Last line belonging to the block (1-based, inclusive).
    pub line_end: usize,
}

impl Block {
    #[must_use]
    /// Number of source lines the block spans.
    pub fn len(&self) -> usize {
        (self.line_end + 1).saturating_sub(self.line_start)
    }

    #[must_use]
    /// Whether the block spans no lines. Scanned blocks always hold their title line.
    pub fn is_empty(&self) -> bool {
        self.line_end < self.line_start
    }
}
