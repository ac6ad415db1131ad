//! Annotation composition: merges persisted comments, the in-progress
//! draft selection, and the walker's per-block action markers into the
//! single ordered list the rendering surface consumes.

use std::collections::HashMap;

use crate::model::{
    AnnotationKind, ChangeBlockId, DiffComment, DiffLineAnnotation, FileDiffMetadata, LineKey,
    RevertInfo, SelectedLines,
};

use super::walker::{HunkWalk, walk_hunks};

/// Inputs for one derivation pass over a single file's diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationInputs<'a> {
    pub comments: &'a [DiffComment],
    pub editing_comment_id: Option<&'a str>,
    pub show_comment_form: bool,
    pub selected_lines: Option<SelectedLines>,
    /// When false the hunk walk is skipped entirely
    pub enable_accept_reject: bool,
    pub metadata: Option<&'a FileDiffMetadata>,
}

#[derive(Debug, Default)]
pub struct ComposedAnnotations {
    pub annotations: Vec<DiffLineAnnotation>,
    pub line_map: HashMap<LineKey, ChangeBlockId>,
    pub revert_map: HashMap<ChangeBlockId, RevertInfo>,
}

/// Pure and recomputed from scratch on every input change; append-only
/// composition, no sorting pass. Comments come first, then the draft
/// form, then the block action markers.
pub fn compose_annotations(inputs: AnnotationInputs<'_>) -> ComposedAnnotations {
    let mut annotations = Vec::new();

    for comment in inputs.comments {
        let is_editing = inputs
            .editing_comment_id
            .is_some_and(|id| id == comment.id);
        annotations.push(DiffLineAnnotation {
            side: comment.side,
            line_number: comment.range.end,
            kind: AnnotationKind::Comment {
                comment: comment.clone(),
                is_editing,
            },
        });
    }

    if inputs.show_comment_form
        && let Some(selection) = inputs.selected_lines
    {
        annotations.push(DiffLineAnnotation {
            side: selection.resolved_side(),
            line_number: selection.anchor_line(),
            kind: AnnotationKind::NewCommentForm,
        });
    }

    let walk = match (inputs.enable_accept_reject, inputs.metadata) {
        (true, Some(metadata)) => walk_hunks(&metadata.hunks),
        _ => HunkWalk::default(),
    };
    annotations.extend(walk.actions);

    ComposedAnnotations {
        annotations,
        line_map: walk.line_map,
        revert_map: walk.revert_map,
    }
}
