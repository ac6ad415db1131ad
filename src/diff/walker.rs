//! The hunk walk: one pass over a file's hunks that assigns change-block
//! ids, indexes every changed line by `(side, line)`, and records the
//! information needed to revert each block.

use std::collections::HashMap;

use crate::model::{
    AnnotationKind, ChangeBlockId, DiffLineAnnotation, DiffSide, Hunk, HunkSegment, LineKey,
    RevertInfo,
};

/// Everything derived from one walk over the current hunk set.
///
/// Rebuilt wholesale on every derivation; callers must treat the maps as
/// immutable snapshots because an earlier reference may still be read
/// from an in-flight hover callback.
#[derive(Debug, Default)]
pub struct HunkWalk {
    /// Changed line -> owning block, for O(1) hover lookup
    pub line_map: HashMap<LineKey, ChangeBlockId>,
    pub revert_map: HashMap<ChangeBlockId, RevertInfo>,
    /// One action annotation per block, anchored above the change
    pub actions: Vec<DiffLineAnnotation>,
}

pub fn walk_hunks(hunks: &[Hunk]) -> HunkWalk {
    let mut walk = HunkWalk::default();
    let mut next_sequence = 0usize;

    for hunk in hunks {
        if hunk.addition_count == 0 && hunk.deletion_count == 0 {
            continue;
        }

        let mut add_line = hunk.addition_start;
        let mut del_line = hunk.deletion_start;
        // A block with no context above it anchors on the hunk start, so
        // the trackers are seeded before the segment loop begins.
        let mut last_context_add = add_line;
        let mut last_context_del = del_line;

        for segment in &hunk.segments {
            match segment {
                HunkSegment::Context(lines) => {
                    let count = lines.len() as u32;
                    if count == 0 {
                        continue;
                    }
                    // Context lines are identical on both sides, so the
                    // same count advances both cursors.
                    add_line += count;
                    del_line += count;
                    last_context_add = add_line - 1;
                    last_context_del = del_line - 1;
                }
                HunkSegment::Change {
                    additions,
                    deletions,
                } => {
                    if additions.is_empty() && deletions.is_empty() {
                        continue;
                    }
                    let id = ChangeBlockId::new(next_sequence);
                    next_sequence += 1;

                    // The action marker renders on the additions side if
                    // the block inserted anything, otherwise on the
                    // deletions side.
                    let (side, anchor) = if additions.is_empty() {
                        (DiffSide::Deletions, last_context_del)
                    } else {
                        (DiffSide::Additions, last_context_add)
                    };
                    walk.actions.push(DiffLineAnnotation {
                        side,
                        line_number: anchor,
                        kind: AnnotationKind::HunkActions {
                            change_block_id: id,
                        },
                    });

                    // Every line of the block maps to the same id, so
                    // hovering any line of a multi-line change lights up
                    // the one control for the whole block.
                    for offset in 0..additions.len() as u32 {
                        walk.line_map
                            .insert(LineKey::new(DiffSide::Additions, add_line + offset), id);
                    }
                    for offset in 0..deletions.len() as u32 {
                        walk.line_map
                            .insert(LineKey::new(DiffSide::Deletions, del_line + offset), id);
                    }

                    walk.revert_map.insert(
                        id,
                        RevertInfo {
                            add_start: add_line,
                            add_count: additions.len() as u32,
                            old_lines: deletions.iter().map(|l| strip_line_ending(l)).collect(),
                        },
                    );

                    add_line += additions.len() as u32;
                    del_line += deletions.len() as u32;
                }
            }
        }
    }

    walk
}

fn strip_line_ending(line: &str) -> String {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
        .to_string()
}
