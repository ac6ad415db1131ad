use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One pull-request review comment, as already fetched from the
/// feedback API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrComment {
    pub id: u64,
    /// Id of the comment this one replies to; `None` or `0` for a
    /// top-level comment
    #[serde(default)]
    pub in_reply_to: Option<u64>,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PrComment {
    /// `path:line` location string, if the comment is anchored to code
    pub fn location(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        Some(match self.line {
            Some(line) => format!("{path}:{line}"),
            None => path.clone(),
        })
    }
}

/// A root comment plus its direct replies
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    pub root: PrComment,
    pub replies: Vec<PrComment>,
}

impl CommentThread {
    /// Total number of comments in the thread, root included
    pub fn len(&self) -> usize {
        1 + self.replies.len()
    }

    pub fn comments(&self) -> impl Iterator<Item = &PrComment> {
        std::iter::once(&self.root).chain(self.replies.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(path: Option<&str>, line: Option<u32>) -> PrComment {
        PrComment {
            id: 1,
            in_reply_to: None,
            author: "octocat".to_string(),
            body: "Looks good".to_string(),
            path: path.map(str::to_string),
            line,
            created_at: None,
        }
    }

    #[test]
    fn location_includes_line_when_present() {
        assert_eq!(
            comment(Some("src/lib.rs"), Some(42)).location(),
            Some("src/lib.rs:42".to_string())
        );
    }

    #[test]
    fn location_is_path_only_without_line() {
        assert_eq!(
            comment(Some("src/lib.rs"), None).location(),
            Some("src/lib.rs".to_string())
        );
    }

    #[test]
    fn location_is_none_without_path() {
        assert_eq!(comment(None, Some(5)).location(), None);
    }
}
