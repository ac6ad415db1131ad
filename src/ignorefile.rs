use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::model::FileDiff;

/// Apply `.revmarkignore` rules from the workspace root to a diff file
/// set, dropping files the reviewer never wants annotated.
pub fn filter_reviewable(workspace_root: &Path, diff_files: Vec<FileDiff>) -> Vec<FileDiff> {
    let Some(matcher) = load_matcher(workspace_root) else {
        return diff_files;
    };

    diff_files
        .into_iter()
        .filter(|file| {
            !matcher
                .matched_path_or_any_parents(file.display_path(), false)
                .is_ignore()
        })
        .collect()
}

fn load_matcher(workspace_root: &Path) -> Option<Gitignore> {
    let ignore_file = workspace_root.join(".revmarkignore");
    if !ignore_file.is_file() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(workspace_root);
    // Malformed patterns are dropped; valid ones still apply.
    let _ = builder.add(ignore_file);
    builder.build().ok()
}
