//! Delivery of the rendered changelog document

use crate::error::{ChangelogError, Result};
use serde_json::json;

/// Delivers a rendered changelog document.
///
/// By the time a document reaches the publisher it is complete and valid;
/// delivery failures are fatal and never retried.
pub trait CommentPublisher {
    fn publish(&self, body: &str) -> Result<()>;
}

/// Posts the document as a pull-request comment via the GitHub API.
pub struct GithubCommentPublisher {
    comments_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl GithubCommentPublisher {
    /// # Arguments
    /// * `comments_url` - The PR's comments API URL
    /// * `token` - API token sent as `Authorization: token <t>`
    pub fn new(comments_url: impl Into<String>, token: impl Into<String>) -> Self {
        GithubCommentPublisher {
            comments_url: comments_url.into(),
            token: token.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl CommentPublisher for GithubCommentPublisher {
    fn publish(&self, body: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.comments_url)
            .header("Authorization", format!("token {}", self.token))
            .header(
                "User-Agent",
                concat!("pr-changelog/", env!("CARGO_PKG_VERSION")),
            )
            .json(&json!({ "body": body }))
            .send()
            .map_err(|e| ChangelogError::publish(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChangelogError::publish(format!(
                "comment API returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Prints the document to stdout instead of posting it. Used by `--dry-run`.
pub struct StdoutPublisher;

impl CommentPublisher for StdoutPublisher {
    fn publish(&self, body: &str) -> Result<()> {
        println!("{}", body);
        Ok(())
    }
}
