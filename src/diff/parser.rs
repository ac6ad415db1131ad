//! Unified diff parser.
//!
//! Parses git-style unified diff text (as emitted by the agent backend)
//! into `FileDiff` structures whose hunks alternate between context runs
//! and change segments, the shape the walker consumes.

use std::path::PathBuf;

use crate::error::{Result, RevmarkError};
use crate::model::{FileDiff, FileDiffMetadata, FileStatus, Hunk, HunkSegment};

/// Parse unified diff output into FileDiff structures.
pub fn parse_unified_diff(diff_text: &str) -> Result<Vec<FileDiff>> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut lines = diff_text.lines().peekable();

    while let Some(line) = lines.next() {
        if !line.starts_with("diff --git ") {
            continue;
        }

        let (old_path, new_path, status) = parse_file_header(&mut lines);

        if lines.peek().is_some_and(|l| l.starts_with("Binary")) {
            lines.next();
            files.push(FileDiff {
                old_path,
                new_path,
                status,
                metadata: FileDiffMetadata::default(),
                is_binary: true,
            });
            continue;
        }

        let mut hunks = Vec::new();
        while let Some(peek_line) = lines.peek() {
            if peek_line.starts_with("diff ") {
                break;
            } else if peek_line.starts_with("@@") {
                if let Some(hunk) = parse_hunk(&mut lines) {
                    hunks.push(hunk);
                }
            } else {
                lines.next(); // skip non-hunk, non-diff lines
            }
        }

        files.push(FileDiff {
            old_path,
            new_path,
            status,
            metadata: FileDiffMetadata { hunks },
            is_binary: false,
        });
    }

    if files.is_empty() {
        return Err(RevmarkError::NoChanges);
    }

    Ok(files)
}

fn parse_file_header<'a, I>(
    lines: &mut std::iter::Peekable<I>,
) -> (Option<PathBuf>, Option<PathBuf>, FileStatus)
where
    I: Iterator<Item = &'a str>,
{
    let mut old_path: Option<PathBuf> = None;
    let mut new_path: Option<PathBuf> = None;
    let mut status = FileStatus::Modified;

    while let Some(line) = lines.peek() {
        if line.starts_with("---") {
            let path_str = line.trim_start_matches("--- ").trim_start_matches("a/");
            if path_str != "/dev/null" {
                old_path = Some(PathBuf::from(path_str));
            }
            lines.next();
        } else if line.starts_with("+++") {
            let path_str = line.trim_start_matches("+++ ").trim_start_matches("b/");
            if path_str != "/dev/null" {
                new_path = Some(PathBuf::from(path_str));
            }
            lines.next();
            break; // done with file header
        } else if line.starts_with("new file") {
            status = FileStatus::Added;
            lines.next();
        } else if line.starts_with("deleted file") {
            status = FileStatus::Deleted;
            lines.next();
        } else if let Some(path) = line.strip_prefix("rename from ") {
            status = FileStatus::Renamed;
            old_path = Some(PathBuf::from(path));
            lines.next();
        } else if let Some(path) = line.strip_prefix("rename to ") {
            new_path = Some(PathBuf::from(path));
            lines.next();
        } else if let Some(path) = line.strip_prefix("copy from ") {
            status = FileStatus::Copied;
            old_path = Some(PathBuf::from(path));
            lines.next();
        } else if let Some(path) = line.strip_prefix("copy to ") {
            new_path = Some(PathBuf::from(path));
            lines.next();
        } else if line.starts_with("@@") || line.starts_with("diff ") {
            break;
        } else if line.starts_with("Binary files ") {
            if let Some((old, new)) = parse_binary_files_line(line) {
                if old_path.is_none() {
                    old_path = old;
                }
                if new_path.is_none() {
                    new_path = new;
                }
            }
            break;
        } else {
            lines.next(); // skip other metadata lines (index, mode, etc.)
        }
    }

    // Determine status from paths if not already set by metadata
    if status == FileStatus::Modified {
        if old_path.is_none() && new_path.is_some() {
            status = FileStatus::Added;
        } else if old_path.is_some() && new_path.is_none() {
            status = FileStatus::Deleted;
        }
    }

    (old_path, new_path, status)
}

fn parse_hunk<'a, I>(lines: &mut std::iter::Peekable<I>) -> Option<Hunk>
where
    I: Iterator<Item = &'a str>,
{
    let header_line = lines.next()?;
    let (deletion_start, deletion_count, addition_start, addition_count) =
        parse_hunk_header(header_line)?;

    let mut segments: Vec<HunkSegment> = Vec::new();
    let mut context_run: Vec<String> = Vec::new();
    let mut additions: Vec<String> = Vec::new();
    let mut deletions: Vec<String> = Vec::new();

    fn flush_context(segments: &mut Vec<HunkSegment>, run: &mut Vec<String>) {
        if !run.is_empty() {
            segments.push(HunkSegment::Context(std::mem::take(run)));
        }
    }
    fn flush_change(
        segments: &mut Vec<HunkSegment>,
        additions: &mut Vec<String>,
        deletions: &mut Vec<String>,
    ) {
        if !additions.is_empty() || !deletions.is_empty() {
            segments.push(HunkSegment::Change {
                additions: std::mem::take(additions),
                deletions: std::mem::take(deletions),
            });
        }
    }

    while let Some(line) = lines.peek() {
        if line.starts_with("@@") || line.starts_with("diff ") {
            break;
        }

        let line = lines.next().unwrap_or_default();

        if line.starts_with('\\') {
            // "\ No newline at end of file" - skip
            continue;
        }

        if let Some(stripped) = line.strip_prefix('+') {
            if line.starts_with("+++") {
                continue;
            }
            flush_context(&mut segments, &mut context_run);
            additions.push(stripped.to_string());
        } else if let Some(stripped) = line.strip_prefix('-') {
            if line.starts_with("---") {
                continue;
            }
            flush_context(&mut segments, &mut context_run);
            deletions.push(stripped.to_string());
        } else if let Some(stripped) = line.strip_prefix(' ') {
            flush_change(&mut segments, &mut additions, &mut deletions);
            context_run.push(stripped.to_string());
        } else if line.is_empty() {
            // context line whose content is empty
            flush_change(&mut segments, &mut additions, &mut deletions);
            context_run.push(String::new());
        } else {
            continue; // unknown format, skip
        }
    }

    flush_context(&mut segments, &mut context_run);
    flush_change(&mut segments, &mut additions, &mut deletions);

    Some(Hunk {
        header: header_line.to_string(),
        addition_start,
        addition_count,
        deletion_start,
        deletion_count,
        segments,
    })
}

fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32)> {
    // Format: @@ -old_start,old_count +new_start,new_count @@
    // or: @@ -old_start +new_start @@ (count defaults to 1)
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 || parts[0] != "@@" {
        return None;
    }

    let old_part = parts[1].trim_start_matches('-');
    let new_part = parts[2].trim_start_matches('+');

    let (old_start, old_count) = parse_range(old_part);
    let (new_start, new_count) = parse_range(new_part);

    Some((old_start, old_count, new_start, new_count))
}

fn parse_range(s: &str) -> (u32, u32) {
    if let Some((start, count)) = s.split_once(',') {
        (start.parse().unwrap_or(1), count.parse().unwrap_or(1))
    } else {
        (s.parse().unwrap_or(1), 1)
    }
}

/// Parse paths from "Binary files a/<old> and b/<new> differ".
/// Either side can be None for /dev/null.
fn parse_binary_files_line(line: &str) -> Option<(Option<PathBuf>, Option<PathBuf>)> {
    let content = line.strip_prefix("Binary files ")?;
    let content = content.strip_suffix(" differ")?;
    let (old_part, new_part) = content.split_once(" and ")?;

    let strip = |part: &str, prefix: &str| -> Option<PathBuf> {
        if part == "/dev/null" {
            None
        } else {
            Some(PathBuf::from(part.strip_prefix(prefix).unwrap_or(part)))
        }
    };

    Some((strip(old_part, "a/"), strip(new_part, "b/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_no_changes_for_empty_diff() {
        assert!(matches!(
            parse_unified_diff(""),
            Err(RevmarkError::NoChanges)
        ));
    }

    #[test]
    fn should_parse_hunk_header() {
        assert_eq!(parse_hunk_header("@@ -1,3 +1,4 @@"), Some((1, 3, 1, 4)));
        assert_eq!(
            parse_hunk_header("@@ -10,5 +20,8 @@ fn context()"),
            Some((10, 5, 20, 8))
        );
    }

    #[test]
    fn should_parse_hunk_header_without_count() {
        let (old_start, old_count, new_start, new_count) =
            parse_hunk_header("@@ -5 +10 @@").unwrap();
        assert_eq!((old_start, old_count, new_start, new_count), (5, 1, 10, 1));
    }

    #[test]
    fn should_reject_invalid_hunk_header() {
        assert!(parse_hunk_header("not a hunk header").is_none());
        assert!(parse_hunk_header("@@ invalid").is_none());
    }

    #[test]
    fn should_parse_simple_diff_into_segments() {
        let diff = r#"diff --git a/file.txt b/file.txt
--- a/file.txt
+++ b/file.txt
@@ -1,3 +1,4 @@
 line1
+added
 line2
 line3
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, FileStatus::Modified);

        let hunk = &files[0].metadata.hunks[0];
        assert_eq!(hunk.addition_start, 1);
        assert_eq!(hunk.addition_count, 4);
        assert_eq!(
            hunk.segments,
            vec![
                HunkSegment::Context(vec!["line1".to_string()]),
                HunkSegment::Change {
                    additions: vec!["added".to_string()],
                    deletions: vec![],
                },
                HunkSegment::Context(vec!["line2".to_string(), "line3".to_string()]),
            ]
        );
    }

    #[test]
    fn should_group_interleaved_changes_into_one_segment() {
        // given - a replacement block: deletions then additions, no
        // context in between
        let diff = r#"diff --git a/file.txt b/file.txt
--- a/file.txt
+++ b/file.txt
@@ -5,4 +5,5 @@
 context
-deleted
+added1
+added2
 more
"#;
        let files = parse_unified_diff(diff).unwrap();
        let hunk = &files[0].metadata.hunks[0];

        assert_eq!(
            hunk.segments[1],
            HunkSegment::Change {
                additions: vec!["added1".to_string(), "added2".to_string()],
                deletions: vec!["deleted".to_string()],
            }
        );
    }

    #[test]
    fn should_split_changes_separated_by_context() {
        let diff = r#"diff --git a/file.txt b/file.txt
--- a/file.txt
+++ b/file.txt
@@ -1,5 +1,5 @@
-first
+FIRST
 keep1
 keep2
-last
+LAST
"#;
        let files = parse_unified_diff(diff).unwrap();
        let segments = &files[0].metadata.hunks[0].segments;

        assert_eq!(segments.len(), 3);
        assert!(matches!(segments[0], HunkSegment::Change { .. }));
        assert!(matches!(segments[1], HunkSegment::Context(_)));
        assert!(matches!(segments[2], HunkSegment::Change { .. }));
    }

    #[test]
    fn should_parse_new_file() {
        let diff = r#"diff --git a/new.txt b/new.txt
new file mode 100644
--- /dev/null
+++ b/new.txt
@@ -0,0 +1,2 @@
+line1
+line2
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Added);
        assert!(files[0].old_path.is_none());
        assert_eq!(files[0].new_path, Some(PathBuf::from("new.txt")));
    }

    #[test]
    fn should_parse_deleted_file() {
        let diff = r#"diff --git a/old.txt b/old.txt
deleted file mode 100644
--- a/old.txt
+++ /dev/null
@@ -1,2 +0,0 @@
-line1
-line2
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Deleted);
        assert!(files[0].new_path.is_none());
    }

    #[test]
    fn should_parse_renamed_file_without_content_changes() {
        let diff = r#"diff --git a/old.txt b/new.txt
rename from old.txt
rename to new.txt
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Renamed);
        assert_eq!(files[0].old_path, Some(PathBuf::from("old.txt")));
        assert_eq!(files[0].new_path, Some(PathBuf::from("new.txt")));
        assert!(files[0].metadata.hunks.is_empty());
    }

    #[test]
    fn should_parse_copied_file_with_content_changes() {
        let diff = r#"diff --git a/source.txt b/dest.txt
copy from source.txt
copy to dest.txt
--- a/source.txt
+++ b/dest.txt
@@ -1 +1,2 @@
 original
+added line
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Copied);
        assert_eq!(files[0].metadata.hunks.len(), 1);
    }

    #[test]
    fn should_parse_binary_file() {
        let diff = r#"diff --git a/image.png b/image.png
index abc1234567..def7890123 100644
Binary files a/image.png and b/image.png differ
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert!(files[0].is_binary);
        assert!(files[0].metadata.hunks.is_empty());
        assert_eq!(files[0].old_path, Some(PathBuf::from("image.png")));
    }

    #[test]
    fn should_parse_binary_file_added() {
        let diff = r#"diff --git a/image.png b/image.png
new file mode 100644
index 0000000000..abc1234567
Binary files /dev/null and b/image.png differ
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert!(files[0].is_binary);
        assert_eq!(files[0].status, FileStatus::Added);
        assert!(files[0].old_path.is_none());
    }

    #[test]
    fn should_parse_multiple_files() {
        let diff = r#"diff --git a/a.txt b/a.txt
--- a/a.txt
+++ b/a.txt
@@ -1 +1 @@
-old
+new
diff --git a/b.txt b/b.txt
--- a/b.txt
+++ b/b.txt
@@ -1 +1 @@
-foo
+bar
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].new_path, Some(PathBuf::from("a.txt")));
        assert_eq!(files[1].new_path, Some(PathBuf::from("b.txt")));
    }

    #[test]
    fn should_parse_multiple_hunks() {
        let diff = r#"diff --git a/multi.rs b/multi.rs
--- a/multi.rs
+++ b/multi.rs
@@ -1,3 +1,4 @@
 fn first() {
+    first_added();
 }
@@ -10,3 +11,4 @@
 fn second() {
+    second_added();
 }
"#;
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].metadata.hunks.len(), 2);
        assert_eq!(files[0].metadata.hunks[0].deletion_start, 1);
        assert_eq!(files[0].metadata.hunks[1].deletion_start, 10);
        assert_eq!(files[0].metadata.hunks[1].addition_start, 11);
    }

    #[test]
    fn should_handle_no_newline_marker() {
        let diff = r#"diff --git a/no_newline.rs b/no_newline.rs
--- a/no_newline.rs
+++ b/no_newline.rs
@@ -1,1 +1,1 @@
-old
\ No newline at end of file
+new
\ No newline at end of file
"#;
        let files = parse_unified_diff(diff).unwrap();
        let segments = &files[0].metadata.hunks[0].segments;
        // the marker must not split the change into two segments
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0],
            HunkSegment::Change {
                additions: vec!["new".to_string()],
                deletions: vec!["old".to_string()],
            }
        );
    }

    #[test]
    fn should_keep_empty_context_lines() {
        let diff = "diff --git a/f.txt b/f.txt\n--- a/f.txt\n+++ b/f.txt\n@@ -1,3 +1,3 @@\n a\n\n-b\n+B\n";
        let files = parse_unified_diff(diff).unwrap();
        let segments = &files[0].metadata.hunks[0].segments;
        assert_eq!(
            segments[0],
            HunkSegment::Context(vec!["a".to_string(), String::new()])
        );
    }
}
