use anyhow::Result;
use clap::Parser;
use std::io::Write;

use pr_changelog::provider::GitCliProvider;
use pr_changelog::publisher::{CommentPublisher, GithubCommentPublisher, StdoutPublisher};
use pr_changelog::workflow::{self, WorkflowResult};
use pr_changelog::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "pr-changelog",
    version,
    about = "Generate a changelog comment and version bump for a pull request"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, env = "BASE_BRANCH", help = "Base branch the pull request targets")]
    branch: String,

    #[arg(short, long, env = "PR_NUMBER", help = "Pull request number")]
    pr: u64,

    #[arg(
        long,
        env = "PR_COMMENTS_URL",
        help = "Pull request comments API URL to post to"
    )]
    comments_url: Option<String>,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "API token used to post the comment"
    )]
    token: Option<String>,

    #[arg(
        long,
        env = "CURRENT_VERSION",
        default_value = "0.1.0",
        help = "Current semantic version to bump"
    )]
    current_version: String,

    #[arg(
        long,
        env = "REMOTE_URL",
        help = "Remote URL to fetch refs from (defaults to remote.origin.url)"
    )]
    remote_url: Option<String>,

    #[arg(long, help = "Print the changelog instead of posting the comment")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Resolve the history provider, falling back to the configured origin
    let provider = match &args.remote_url {
        Some(url) => GitCliProvider::new(url.clone(), &args.branch, args.pr),
        None => match GitCliProvider::from_origin(&args.branch, args.pr) {
            Ok(provider) => provider,
            Err(e) => {
                ui::display_error(&format!("Git repository error: {}", e));
                std::process::exit(1);
            }
        },
    };

    // Resolve the publisher; posting needs a token and a comments URL
    let publisher: Box<dyn CommentPublisher> = if args.dry_run {
        Box::new(StdoutPublisher)
    } else {
        let token = match args.token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => {
                ui::display_error("Missing auth token (set GITHUB_TOKEN or --token)");
                std::process::exit(1);
            }
        };
        let comments_url = match args.comments_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => {
                ui::display_error("Missing comments URL (set PR_COMMENTS_URL or --comments-url)");
                std::process::exit(1);
            }
        };
        Box::new(GithubCommentPublisher::new(comments_url, token))
    };

    ui::display_status("Generating changelog...");

    let result = match workflow::run(
        &provider,
        publisher.as_ref(),
        &config,
        &args.current_version,
    ) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_success(&format!(
        "Analyzed {} commits on origin/{}..origin/pr/{}",
        result.commit_count, args.branch, args.pr
    ));
    ui::display_success(&format!("Version bump type: {}", result.bump_type));
    ui::display_success(&format!("Next version: {}", result.next_version));

    write_action_outputs(&result)?;

    Ok(())
}

/// Append `bump-type`, `next-version`, and `content` to the GitHub Actions
/// output file when running under Actions. No-op otherwise.
fn write_action_outputs(result: &WorkflowResult) -> Result<()> {
    let Some(path) = std::env::var_os("GITHUB_OUTPUT") else {
        return Ok(());
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    writeln!(file, "bump-type={}", result.bump_type)?;
    writeln!(file, "next-version={}", result.next_version)?;
    writeln!(file, "content<<PR_CHANGELOG_EOF")?;
    writeln!(file, "{}", result.content.trim_end())?;
    writeln!(file, "PR_CHANGELOG_EOF")?;

    Ok(())
}
