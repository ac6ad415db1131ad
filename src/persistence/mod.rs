mod storage;

pub use storage::{find_session_for_workspace, load_session, save_session};
