//! Single-run changelog pipeline
//!
//! Sequential steps (ingest, classify, aggregate, publish) with one parallel
//! fan-out stage for file attribution. All state lives for one invocation
//! and is discarded once the document and bump type are handed off.

use std::thread;

use crate::changelog;
use crate::classify::{Category, RuleTable};
use crate::config::Config;
use crate::error::{ChangelogError, Result};
use crate::history::{parse_commit_log, CommitHistory};
use crate::provider::{CommitHistoryProvider, RawOutput};
use crate::publisher::CommentPublisher;
use crate::ui;
use crate::version::{next_version, VersionBump};

/// Result of a completed changelog run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Rendered Markdown document
    pub content: String,

    /// Maximum-severity category across all commits
    pub bump_type: Category,

    /// Next semantic version string
    pub next_version: String,

    /// Number of commits in the analyzed range
    pub commit_count: usize,
}

/// Run the full pipeline: fetch refs, ingest the log, attribute files,
/// classify, render, compute the next version, and publish.
///
/// Fatal errors (retrieval diagnostics, publish failures, an unparseable
/// current version) abort the run; no partial changelog is ever published.
pub fn run(
    provider: &dyn CommitHistoryProvider,
    publisher: &dyn CommentPublisher,
    config: &Config,
    current_version: &str,
) -> Result<WorkflowResult> {
    provider.fetch_refs()?;

    let log = provider.commit_log()?;
    if log.has_diagnostics() {
        return Err(ChangelogError::retrieval(log.stderr.trim().to_string()));
    }

    let mut history = parse_commit_log(&log.stdout);
    ui::display_commit_summary(&history);

    attach_changed_files(provider, &mut history)?;

    let rules = RuleTable::from_config(&config.classifier);
    changelog::classify_history(&mut history, &rules);

    let (document, bump_type) = changelog::build_changelog(&history);
    let content = changelog::render(&document, &config.template);
    let next = next_version(current_version, VersionBump::from(bump_type))?;

    publisher.publish(&content)?;

    Ok(WorkflowResult {
        content,
        bump_type,
        next_version: next.to_string(),
        commit_count: history.len(),
    })
}

/// Resolve changed file paths for every commit, one lookup per commit.
///
/// Lookups run on scoped threads; each task owns exactly one result slot, so
/// no synchronization is needed. The function waits for every task to settle
/// (no cancellation) and aborts with the accumulated diagnostics if any
/// lookup failed - partial results are discarded, nothing is attached.
fn attach_changed_files(
    provider: &dyn CommitHistoryProvider,
    history: &mut CommitHistory,
) -> Result<()> {
    let ids: Vec<String> = history.ids().map(str::to_string).collect();

    let outputs: Vec<Result<RawOutput>> = thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| scope.spawn(move || provider.changed_files(id)))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(ChangelogError::retrieval("file lookup task panicked")))
            })
            .collect()
    });

    let mut diagnostics = String::new();
    let mut resolved: Vec<(String, Vec<String>)> = Vec::with_capacity(ids.len());

    for (id, output) in ids.into_iter().zip(outputs) {
        let output = output?;
        if output.has_diagnostics() {
            diagnostics.push_str(&output.stderr);
            continue;
        }
        let files = output
            .stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        resolved.push((id, files));
    }

    if !diagnostics.trim().is_empty() {
        return Err(ChangelogError::retrieval(diagnostics.trim().to_string()));
    }

    for (id, files) in resolved {
        history.attach_files(&id, files);
    }

    Ok(())
}
