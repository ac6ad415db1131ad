use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RevmarkError};
use crate::review::ReviewSession;

fn sessions_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "revmark").ok_or_else(|| {
        RevmarkError::Io(std::io::Error::other("Could not determine data directory"))
    })?;

    let data_dir = proj_dirs.data_dir().join("sessions");
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

fn session_filename(session: &ReviewSession) -> String {
    let workspace_name = session
        .workspace
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let short_id = &session.id[..8.min(session.id.len())];
    let timestamp = session.created_at.format("%Y%m%d_%H%M%S");

    format!("{workspace_name}_{short_id}_{timestamp}.json")
}

pub fn save_session(session: &ReviewSession) -> Result<PathBuf> {
    save_session_in(&sessions_dir()?, session)
}

fn save_session_in(dir: &Path, session: &ReviewSession) -> Result<PathBuf> {
    let path = dir.join(session_filename(session));
    let json = serde_json::to_string_pretty(session)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn load_session(path: &Path) -> Result<ReviewSession> {
    let contents = fs::read_to_string(path)?;
    let session: ReviewSession = serde_json::from_str(&contents)
        .map_err(|e| RevmarkError::CorruptedSession(e.to_string()))?;
    Ok(session)
}

/// Most recently modified saved session for a workspace, if any.
pub fn find_session_for_workspace(workspace: &Path) -> Result<Option<PathBuf>> {
    find_session_in(&sessions_dir()?, workspace)
}

fn find_session_in(dir: &Path, workspace: &Path) -> Result<Option<PathBuf>> {
    let workspace_name = workspace
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let mut matching: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_name().to_str().is_some_and(|name| {
                name.starts_with(workspace_name) && name.ends_with(".json")
            })
        })
        .collect();

    matching.sort_by_key(|e| std::cmp::Reverse(e.metadata().ok().and_then(|m| m.modified().ok())));

    Ok(matching.first().map(|e| e.path()))
}
