//! Commit history retrieval abstraction
//!
//! The core consumes raw text from a [CommitHistoryProvider] and never talks
//! to git itself. [GitCliProvider] is the real implementation shelling out to
//! the `git` binary; [MockProvider] scripts responses for tests.

use crate::error::{ChangelogError, Result};
use std::collections::HashMap;
use std::process::Command;

/// Captured stdout and stderr of a retrieval command.
///
/// Non-empty stderr is treated by the caller as a run-fatal diagnostic even
/// when stdout carries data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        RawOutput {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn diagnostic(stderr: impl Into<String>) -> Self {
        RawOutput {
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Supplies raw commit and file listings for a pull-request range.
///
/// Implementors must be `Send + Sync`: file attribution fans out one lookup
/// per commit across threads, each task calling [changed_files] for its own
/// commit only.
///
/// [changed_files]: CommitHistoryProvider::changed_files
pub trait CommitHistoryProvider: Send + Sync {
    /// Fetch the branch and PR refs needed by the log query
    fn fetch_refs(&self) -> Result<()>;

    /// Raw log text, one `<40-char-id><separator><subject>` line per commit
    fn commit_log(&self) -> Result<RawOutput>;

    /// Raw changed-file listing for one commit, one path per line
    fn changed_files(&self, id: &str) -> Result<RawOutput>;
}

/// Provider backed by the `git` command line.
pub struct GitCliProvider {
    remote_url: String,
    base_branch: String,
    pr_number: u64,
}

impl GitCliProvider {
    pub fn new(remote_url: impl Into<String>, base_branch: impl Into<String>, pr_number: u64) -> Self {
        GitCliProvider {
            remote_url: remote_url.into(),
            base_branch: base_branch.into(),
            pr_number,
        }
    }

    /// Build a provider using the repository's configured origin URL
    pub fn from_origin(base_branch: impl Into<String>, pr_number: u64) -> Result<Self> {
        let output = run_git(&["config", "--get", "remote.origin.url"])?;
        if output.has_diagnostics() {
            return Err(ChangelogError::retrieval(output.stderr.trim().to_string()));
        }

        let url = output.stdout.trim().to_string();
        if url.is_empty() {
            return Err(ChangelogError::retrieval("remote.origin.url is not set"));
        }

        Ok(GitCliProvider::new(url, base_branch, pr_number))
    }
}

impl CommitHistoryProvider for GitCliProvider {
    fn fetch_refs(&self) -> Result<()> {
        // PR head refs first, then branch heads; git reports fetch progress
        // on stderr, so only the exit status decides success here
        run_git_checked(&[
            "fetch",
            "--no-tags",
            "--prune",
            &self.remote_url,
            "+refs/pull/*/head:refs/remotes/origin/pr/*",
        ])?;
        run_git_checked(&[
            "fetch",
            "--no-tags",
            &self.remote_url,
            "+refs/heads/*:refs/remotes/origin/*",
        ])?;
        Ok(())
    }

    fn commit_log(&self) -> Result<RawOutput> {
        // merge commits are excluded here, not by the classifier
        let range = format!(
            "origin/{}..origin/pr/{}",
            self.base_branch, self.pr_number
        );
        run_git(&["log", "--no-merges", "--pretty=format:%H %s", &range])
    }

    fn changed_files(&self, id: &str) -> Result<RawOutput> {
        run_git(&["diff-tree", "--no-commit-id", "--name-only", "-r", id])
    }
}

fn run_git(args: &[&str]) -> Result<RawOutput> {
    let output = Command::new("git").args(args).output().map_err(|e| {
        ChangelogError::retrieval(format!("failed to run git {}: {}", args.join(" "), e))
    })?;

    Ok(RawOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// For fetch-style commands stderr is progress chatter; only a non-zero
/// exit code is a failure.
fn run_git_checked(args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).output().map_err(|e| {
        ChangelogError::retrieval(format!("failed to run git {}: {}", args.join(" "), e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangelogError::retrieval(format!(
            "git {} failed with exit code {}: {}",
            args.join(" "),
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }
    Ok(())
}

/// Mock provider for testing without a git repository.
///
/// Responses are scripted per command; missing file lookups return an empty
/// (valid) listing.
#[derive(Debug, Default)]
pub struct MockProvider {
    log: RawOutput,
    files: HashMap<String, RawOutput>,
}

impl MockProvider {
    pub fn new() -> Self {
        MockProvider::default()
    }

    /// Script the commit log response
    pub fn set_log(&mut self, output: RawOutput) {
        self.log = output;
    }

    /// Script the changed-files response for one commit id
    pub fn set_files(&mut self, id: impl Into<String>, output: RawOutput) {
        self.files.insert(id.into(), output);
    }
}

impl CommitHistoryProvider for MockProvider {
    fn fetch_refs(&self) -> Result<()> {
        Ok(())
    }

    fn commit_log(&self) -> Result<RawOutput> {
        Ok(self.log.clone())
    }

    fn changed_files(&self, id: &str) -> Result<RawOutput> {
        Ok(self.files.get(id).cloned().unwrap_or_default())
    }
}
