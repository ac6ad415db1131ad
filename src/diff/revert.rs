//! Revert resolution and application for change blocks.
//!
//! The engine resolves a block id to its revert record and splices the
//! pre-change lines back into the new file content; actually writing the
//! file is the caller's job.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::model::{ChangeBlockId, RevertInfo};

/// Handed to the injected revert executor; the engine performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertRequest {
    pub file_path: PathBuf,
    pub info: RevertInfo,
}

/// Look up the revert record for a block. A stale id from a previous
/// derivation resolves to `None`; the caller treats that as a no-op.
pub fn resolve_revert(
    revert_map: &HashMap<ChangeBlockId, RevertInfo>,
    id: ChangeBlockId,
) -> Option<&RevertInfo> {
    revert_map.get(&id)
}

/// Replace lines `[add_start, add_start + add_count)` of the new file
/// content with the block's pre-change lines, reconstructing the old
/// region exactly (modulo trailing-newline normalization).
///
/// Out-of-range positions clamp to the content instead of panicking.
pub fn apply_revert(content: &str, info: &RevertInfo) -> String {
    let had_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<&str> = content.lines().collect();

    let start = (info.add_start.saturating_sub(1) as usize).min(lines.len());
    let end = (start + info.add_count as usize).min(lines.len());
    let old: Vec<&str> = info.old_lines.iter().map(String::as_str).collect();
    lines.splice(start..end, old);

    let mut result = lines.join("\n");
    if had_trailing_newline && !result.is_empty() {
        result.push('\n');
    }
    result
}
