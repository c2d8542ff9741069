//! CLI for the gl-migrator tool.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gl_migrator::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gl-migrator")]
#[command(author, version, about = "Migrate a GitLab repository to GitHub", long_about = None)]
struct Cli {
    /// Source repository URL (GitLab)
    #[arg(short, long)]
    source: String,

    /// Destination repository URL (GitHub); the repository must already exist
    #[arg(short, long)]
    destination: String,

    /// GitLab project ID (looked up from the source path when omitted)
    #[arg(short, long)]
    pid: Option<u64>,

    /// Remove the working directory contents before and after the run
    #[arg(short, long)]
    remove: bool,

    /// Set the destination default branch to master, main or develop
    #[arg(short = 'b', long)]
    defbranch: bool,

    /// Push tags together with branches
    #[arg(long)]
    push_tags: bool,

    /// Do not replicate merge requests
    #[arg(long)]
    skip_merge_requests: bool,

    /// Do not replicate issues
    #[arg(long)]
    skip_issues: bool,

    /// Do not replicate tags through the API
    #[arg(long)]
    skip_tags: bool,

    /// Scratch directory for the bare mirror
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitLab personal access token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    gitlab_token: Option<String>,

    /// GitHub API base URL (derived from the destination host by default)
    #[arg(long)]
    github_api_url: Option<String>,

    /// GitLab API base URL (derived from the source host by default)
    #[arg(long)]
    gitlab_api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    // Usage errors exit with 1 like every other fatal condition.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(report) => {
            report.log();
            if report.failures() > 0 {
                tracing::warn!(
                    failures = report.failures(),
                    "finished with per-item failures, see the log above"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "gl_migrator=info",
        1 => "gl_migrator=debug",
        _ => "gl_migrator=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<MigrationReport> {
    let config = build_config(cli)?;
    gl_migrator::migrate::run(&config).context("Migration failed")
}

fn build_config(cli: Cli) -> Result<RunConfig> {
    let source = RepoLocation::parse(&cli.source).context("Invalid --source")?;
    let destination = RepoLocation::parse(&cli.destination).context("Invalid --destination")?;

    let store_path = CredentialStore::default_path()?;
    let mut store = CredentialStore::load(&store_path)
        .with_context(|| format!("Failed to read {}", store_path.display()))?;
    let tokens = resolve_tokens(cli.github_token, cli.gitlab_token, &mut store, &TerminalPrompt)
        .context("Failed to obtain access tokens")?;

    let mut config = RunConfig::new(source, destination, tokens);
    config.project_id = cli.pid;
    config.workdir = cli.workdir;
    config.remove_workdir = cli.remove;
    config.set_default_branch = cli.defbranch;
    config.push_tags = cli.push_tags;
    config.stages = Stages {
        merge_requests: !cli.skip_merge_requests,
        issues: !cli.skip_issues,
        tags: !cli.skip_tags,
    };
    if let Some(url) = cli.github_api_url {
        config.github_api_url = url;
    }
    if let Some(url) = cli.gitlab_api_url {
        config.gitlab_api_url = url;
    }

    tracing::debug!(?config, "run configuration");
    Ok(config)
}
