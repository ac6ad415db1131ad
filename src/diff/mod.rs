pub mod compose;
pub mod parser;
pub mod revert;
pub mod walker;

pub use compose::{AnnotationInputs, ComposedAnnotations, compose_annotations};
pub use parser::parse_unified_diff;
pub use revert::{RevertRequest, apply_revert, resolve_revert};
pub use walker::{HunkWalk, walk_hunks};
