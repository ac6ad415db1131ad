use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which half of the diff a line or annotation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiffSide {
    /// The new-file half (added and context lines)
    #[default]
    Additions,
    /// The old-file half (deleted lines)
    Deletions,
}

/// A range of lines for a comment (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a new line range, normalizing reversed bounds
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Create a single-line range
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Check if this is a single-line range
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Check if this range contains a given line
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

/// An in-progress line selection for a new comment.
///
/// `start` and `end` are kept in drag order; the anchor resolves to the
/// larger of the two so a bottom-to-top drag anchors the same as a
/// top-to-bottom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedLines {
    pub start: u32,
    pub end: u32,
    /// None when the selection gesture didn't carry a side
    #[serde(default)]
    pub side: Option<DiffSide>,
}

impl SelectedLines {
    pub fn new(start: u32, end: u32, side: Option<DiffSide>) -> Self {
        Self { start, end, side }
    }

    /// A single-line selection with a known side
    pub fn single(line: u32, side: DiffSide) -> Self {
        Self {
            start: line,
            end: line,
            side: Some(side),
        }
    }

    /// Line the new-comment form renders on
    pub fn anchor_line(&self) -> u32 {
        self.start.max(self.end)
    }

    pub fn resolved_side(&self) -> DiffSide {
        self.side.unwrap_or_default()
    }

    pub fn range(&self) -> LineRange {
        LineRange::new(self.start, self.end)
    }
}

/// A review comment anchored to a line range of one file's diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffComment {
    pub id: String,
    pub file_path: PathBuf,
    #[serde(default)]
    pub side: DiffSide,
    pub range: LineRange,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl DiffComment {
    pub fn new(file_path: PathBuf, side: DiffSide, range: LineRange, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path,
            side,
            range,
            text,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod line_range_tests {
        use super::*;

        #[test]
        fn new_creates_range_with_correct_bounds() {
            let range = LineRange::new(10, 20);
            assert_eq!(range.start, 10);
            assert_eq!(range.end, 20);
        }

        #[test]
        fn new_normalizes_reversed_bounds() {
            let range = LineRange::new(20, 10);
            assert_eq!(range.start, 10);
            assert_eq!(range.end, 20);
        }

        #[test]
        fn single_creates_single_line_range() {
            let range = LineRange::single(42);
            assert_eq!(range.start, 42);
            assert_eq!(range.end, 42);
            assert!(range.is_single());
        }

        #[test]
        fn contains_covers_bounds_and_interior() {
            let range = LineRange::new(10, 20);
            assert!(range.contains(10));
            assert!(range.contains(15));
            assert!(range.contains(20));
            assert!(!range.contains(9));
            assert!(!range.contains(21));
        }
    }

    mod selected_lines_tests {
        use super::*;

        #[test]
        fn anchor_is_max_for_forward_drag() {
            let selection = SelectedLines::new(15, 20, Some(DiffSide::Additions));
            assert_eq!(selection.anchor_line(), 20);
        }

        #[test]
        fn anchor_is_max_for_backward_drag() {
            // given - a bottom-to-top drag, start above end
            let selection = SelectedLines::new(20, 15, Some(DiffSide::Deletions));

            // then - anchors at 20, not 15
            assert_eq!(selection.anchor_line(), 20);
            assert_eq!(selection.range(), LineRange::new(15, 20));
        }

        #[test]
        fn side_defaults_to_additions_when_missing() {
            let selection = SelectedLines::new(1, 3, None);
            assert_eq!(selection.resolved_side(), DiffSide::Additions);
        }
    }

    mod comment_tests {
        use super::*;
        use std::path::PathBuf;

        #[test]
        fn new_assigns_id_and_timestamp() {
            let comment = DiffComment::new(
                PathBuf::from("src/main.rs"),
                DiffSide::Additions,
                LineRange::new(5, 8),
                "Rename this".to_string(),
            );
            assert!(!comment.id.is_empty());
            assert_eq!(comment.range.end, 8);
        }

        #[test]
        fn comment_serializes_side_lowercase() {
            let comment = DiffComment::new(
                PathBuf::from("src/lib.rs"),
                DiffSide::Deletions,
                LineRange::single(3),
                "Why removed?".to_string(),
            );
            let json = serde_json::to_string(&comment).unwrap();
            assert!(json.contains("\"side\":\"deletions\""));
        }

        #[test]
        fn comment_without_side_deserializes_with_default() {
            let json = r#"{
                "id": "test-id",
                "file_path": "src/main.rs",
                "range": {"start": 10, "end": 15},
                "text": "Old format",
                "created_at": "2024-01-01T00:00:00Z"
            }"#;
            let comment: DiffComment = serde_json::from_str(json).unwrap();
            assert_eq!(comment.side, DiffSide::Additions);
            assert_eq!(comment.range.start, 10);
        }
    }
}
