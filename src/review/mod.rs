pub mod draft;
pub mod session;

pub use draft::DraftBuffer;
pub use session::{FileComments, ReviewSession};
