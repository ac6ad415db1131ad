//! Pull-request review comment retrieval from the GitHub REST API.

use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use crate::error::{Result, RevmarkError};

use super::types::PrComment;

const API_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_API_BASE: &str = "https://api.github.com";

pub struct FeedbackClient {
    agent: Agent,
    api_base: String,
    token: Option<String>,
}

/// Review comment as the API returns it; flattened into `PrComment`.
#[derive(Debug, Deserialize)]
struct WireReviewComment {
    id: u64,
    #[serde(default)]
    in_reply_to_id: Option<u64>,
    #[serde(default)]
    user: Option<WireUser>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    login: String,
}

impl From<WireReviewComment> for PrComment {
    fn from(wire: WireReviewComment) -> Self {
        PrComment {
            id: wire.id,
            in_reply_to: wire.in_reply_to_id,
            author: wire
                .user
                .map(|user| user.login)
                .unwrap_or_else(|| "unknown".to_string()),
            body: wire.body,
            path: wire.path,
            line: wire.line,
            created_at: wire.created_at,
        }
    }
}

impl FeedbackClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, token)
    }

    pub fn with_api_base(api_base: impl Into<String>, token: Option<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(API_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
            api_base: api_base.into(),
            token,
        }
    }

    /// Fetch the review comments of one pull request.
    pub fn fetch_review_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PrComment>> {
        let url = format!(
            "{}/repos/{owner}/{repo}/pulls/{number}/comments?per_page=100",
            self.api_base
        );

        let mut request = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "revmark");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .call()
            .map_err(|e| RevmarkError::Feedback(format!("Network error: {e}")))?;

        let wire: Vec<WireReviewComment> = response
            .into_body()
            .read_json()
            .map_err(|e| RevmarkError::Feedback(format!("Failed to parse response: {e}")))?;

        Ok(wire.into_iter().map(PrComment::from).collect())
    }
}
