//! revmark: the annotation engine behind an agent-task diff review
//! surface.
//!
//! Given one file's parsed diff, revmark derives line-addressable
//! annotations (review comments, the in-progress draft form, and
//! accept/reject controls for revertible change blocks), resolves block
//! ids back to revert operations, and groups pull-request feedback into
//! comment threads and chat-context messages. Rendering and transport
//! belong to the embedding application; everything here is synchronous,
//! pure derivation over in-memory state.

pub mod config;
pub mod diff;
pub mod error;
pub mod feedback;
pub mod hover;
pub mod ignorefile;
pub mod model;
pub mod output;
pub mod persistence;
pub mod review;

pub use error::{Result, RevmarkError};
