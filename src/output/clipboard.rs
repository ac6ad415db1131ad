//! Clipboard delivery for chat-context messages.
//!
//! The system clipboard is unreliable under tmux and over SSH, where
//! arboard can "succeed" into an X11 clipboard nobody can reach. The
//! OSC 52 escape sequence works in those environments, and inside tmux
//! the copy goes through `tmux load-buffer -w` so tmux forwards it to
//! the outer terminal itself.

use std::io::Write as IoWrite;

use arboard::Clipboard;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::{Result, RevmarkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyRoute {
    System,
    Terminal,
    Tmux,
}

/// Copy a chat-context message to the clipboard. Returns a status line
/// describing the route taken.
pub fn copy_to_clipboard(content: &str) -> Result<String> {
    if content.is_empty() {
        return Err(RevmarkError::NoComments);
    }

    match pick_route() {
        CopyRoute::Tmux => {
            copy_via_tmux(content)?;
            Ok("Copied to clipboard (via tmux)".to_string())
        }
        CopyRoute::Terminal => {
            let mut stdout = std::io::stdout().lock();
            write_osc52(&mut stdout, content)?;
            Ok("Copied to clipboard (via terminal)".to_string())
        }
        CopyRoute::System => {
            match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(content)) {
                Ok(_) => Ok("Copied to clipboard".to_string()),
                Err(_) => {
                    // Fall back to OSC 52, which also works over SSH
                    let mut stdout = std::io::stdout().lock();
                    write_osc52(&mut stdout, content)?;
                    Ok("Copied to clipboard (via terminal)".to_string())
                }
            }
        }
    }
}

fn pick_route() -> CopyRoute {
    if std::env::var("TMUX").is_ok() {
        CopyRoute::Tmux
    } else if std::env::var("SSH_TTY").is_ok() || std::env::var("ZELLIJ").is_ok() {
        CopyRoute::Terminal
    } else {
        CopyRoute::System
    }
}

/// Copy via `tmux load-buffer -w -`; the `-w` flag makes tmux forward
/// the buffer to the outer terminal's clipboard through OSC 52.
fn copy_via_tmux(text: &str) -> Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("tmux")
        .args(["load-buffer", "-w", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| RevmarkError::Clipboard(format!("Failed to run tmux: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| RevmarkError::Clipboard(format!("Failed to write to tmux: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| RevmarkError::Clipboard(format!("tmux load-buffer failed: {e}")))?;

    if !status.success() {
        return Err(RevmarkError::Clipboard(
            "tmux load-buffer exited with error".to_string(),
        ));
    }

    Ok(())
}

/// Write the OSC 52 escape sequence to the given writer.
/// Separated for testability.
fn write_osc52<W: IoWrite>(writer: &mut W, text: &str) -> Result<()> {
    let encoded = BASE64.encode(text);
    write!(writer, "\x1b]52;c;{encoded}\x07")
        .map_err(|e| RevmarkError::Clipboard(format!("Failed to write OSC 52: {e}")))?;
    writer
        .flush()
        .map_err(|e| RevmarkError::Clipboard(format!("Failed to flush: {e}")))?;
    Ok(())
}
