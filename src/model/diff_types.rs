use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

/// One run of lines inside a hunk body.
///
/// A hunk alternates between context runs and change segments; a change
/// segment carries the deleted and added lines of one contiguous edit and
/// is the unit the walker turns into a revertible change block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkSegment {
    Context(Vec<String>),
    Change {
        additions: Vec<String>,
        deletions: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Hunk {
    pub header: String,
    /// First line number on the new-file side (from the @@ header)
    pub addition_start: u32,
    pub addition_count: u32,
    /// First line number on the old-file side (from the @@ header)
    pub deletion_start: u32,
    pub deletion_count: u32,
    pub segments: Vec<HunkSegment>,
}

/// Parsed diff metadata for a single file, as handed to the walker.
#[derive(Debug, Clone, Default)]
pub struct FileDiffMetadata {
    pub hunks: Vec<Hunk>,
}

#[derive(Debug, Clone)]
pub struct FileDiff {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub status: FileStatus,
    pub metadata: FileDiffMetadata,
    pub is_binary: bool,
}

impl FileDiff {
    pub fn display_path(&self) -> &PathBuf {
        self.new_path
            .as_ref()
            .or(self.old_path.as_ref())
            .expect("FileDiff must have at least one path")
    }
}
