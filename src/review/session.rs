use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::diff::{
    AnnotationInputs, ComposedAnnotations, RevertRequest, compose_annotations, resolve_revert,
};
use crate::model::{ChangeBlockId, DiffComment, FileDiffMetadata, SelectedLines};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileComments {
    pub comments: Vec<DiffComment>,
}

impl FileComments {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// One review session over a workspace: the persisted comment store plus
/// the transient state the annotation compositor binds to (selection,
/// open draft form, comment being edited).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    pub id: String,
    pub version: String,
    pub workspace: PathBuf,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub files: HashMap<PathBuf, FileComments>,

    #[serde(skip)]
    pub editing_comment: Option<String>,
    #[serde(skip)]
    pub show_comment_form: bool,
    #[serde(skip)]
    pub selection: Option<SelectedLines>,
}

impl ReviewSession {
    pub fn new(workspace: PathBuf) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            version: "1.0".to_string(),
            workspace,
            created_at: now,
            updated_at: now,
            files: HashMap::new(),
            editing_comment: None,
            show_comment_form: false,
            selection: None,
        }
    }

    pub fn comments_for(&self, path: &Path) -> &[DiffComment] {
        self.files
            .get(path)
            .map(|f| f.comments.as_slice())
            .unwrap_or_default()
    }

    pub fn comment_count(&self) -> usize {
        self.files.values().map(FileComments::comment_count).sum()
    }

    pub fn has_comments(&self) -> bool {
        self.comment_count() > 0
    }

    /// Open the draft form over the given selection.
    pub fn begin_comment(&mut self, selection: SelectedLines) {
        self.selection = Some(selection);
        self.show_comment_form = true;
    }

    /// Close the draft form, discarding the selection.
    pub fn cancel_comment(&mut self) {
        self.selection = None;
        self.show_comment_form = false;
    }

    /// Turn the active selection and the given text into a persisted
    /// comment. Returns the new comment's id, or `None` when no
    /// selection is active.
    pub fn submit_comment(&mut self, path: &Path, text: String) -> Option<String> {
        let selection = self.selection.take()?;
        self.show_comment_form = false;

        let comment = DiffComment::new(
            path.to_path_buf(),
            selection.resolved_side(),
            selection.range(),
            text,
        );
        let id = comment.id.clone();
        self.add_comment(comment);
        Some(id)
    }

    pub fn add_comment(&mut self, comment: DiffComment) {
        self.files
            .entry(comment.file_path.clone())
            .or_default()
            .comments
            .push(comment);
        self.touch();
    }

    pub fn update_comment(&mut self, path: &Path, id: &str, text: String) -> bool {
        let Some(file) = self.files.get_mut(path) else {
            return false;
        };
        let Some(comment) = file.comments.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        comment.text = text;
        if self.editing_comment.as_deref() == Some(id) {
            self.editing_comment = None;
        }
        self.touch();
        true
    }

    pub fn remove_comment(&mut self, path: &Path, id: &str) -> bool {
        let Some(file) = self.files.get_mut(path) else {
            return false;
        };
        let before = file.comments.len();
        file.comments.retain(|c| c.id != id);
        let removed = file.comments.len() < before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn set_editing_comment(&mut self, id: Option<String>) {
        self.editing_comment = id;
    }

    /// Derive the full annotation list (and hover/revert maps) for one
    /// file's diff from the current session state.
    pub fn annotations_for(
        &self,
        path: &Path,
        metadata: Option<&FileDiffMetadata>,
        enable_accept_reject: bool,
    ) -> ComposedAnnotations {
        compose_annotations(AnnotationInputs {
            comments: self.comments_for(path),
            editing_comment_id: self.editing_comment.as_deref(),
            show_comment_form: self.show_comment_form,
            selected_lines: self.selection,
            enable_accept_reject,
            metadata,
        })
    }

    /// Resolve a block id against a derivation's revert map into a
    /// request for the injected executor. A stale id yields `None`.
    pub fn request_revert(
        &self,
        path: &Path,
        composed: &ComposedAnnotations,
        id: ChangeBlockId,
    ) -> Option<RevertRequest> {
        resolve_revert(&composed.revert_map, id).map(|info| RevertRequest {
            file_path: path.to_path_buf(),
            info: info.clone(),
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
