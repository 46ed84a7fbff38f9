//! gitstreak command line tool
//!
//! Analyzes GitHub contribution streaks and backfills them with backdated commits.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use gitstreak::app::{self, report, StreakManager};
use gitstreak::cli::{Cli, Commands};
use gitstreak::commit::{BackdateRequest, CommitBatchExecutor, GitRepository, Pacing};
use gitstreak::config::Config;
use gitstreak::github::{CalendarSource, GitHubClient};
use gitstreak::schedule::{ScheduleGenerator, ScheduleMode};
use gitstreak::types::{DaySchedule, ExecutionResult};
use gitstreak::utils::{parse_commit_date, DateRange};

/// How the blocking commit worker reaches the working copy.
struct Target {
    repo: PathBuf,
    push: bool,
    pacing: Pacing,
    token: Option<String>,
}

impl Target {
    fn open(&self) -> Result<CommitBatchExecutor<GitRepository>> {
        let vcs = GitRepository::open(&self.repo)
            .with_context(|| format!("failed to open repository {}", self.repo.display()))?
            .with_token(self.token.clone());
        Ok(CommitBatchExecutor::new(vcs)
            .with_push(self.push)
            .with_pacing(self.pacing))
    }
}

fn init_logging() {
    let default_level = if cfg!(feature = "dev") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn github_client(config: &Config) -> Result<GitHubClient> {
    let token = config.require_token()?;
    Ok(GitHubClient::new(token)?.with_api_url(config.github.api_url.clone()))
}

/// Run a schedule on a blocking worker so git2 and the pacing sleeps stay off
/// the async runtime.
async fn execute(target: Target, schedule: DaySchedule) -> Result<ExecutionResult> {
    tokio::task::spawn_blocking(move || -> Result<ExecutionResult> {
        let mut executor = target.open()?;
        let mut rng = StdRng::from_entropy();
        Ok(executor.execute(&schedule, &mut rng))
    })
    .await
    .context("commit worker panicked")?
}

async fn backdate(target: Target, request: BackdateRequest) -> Result<ExecutionResult> {
    tokio::task::spawn_blocking(move || -> Result<ExecutionResult> {
        let mut executor = target.open()?;
        let mut rng = StdRng::from_entropy();
        Ok(executor.backdate(&request, &mut rng))
    })
    .await
    .context("commit worker panicked")?
}

fn print_push_note(pushed: bool) {
    if !pushed {
        println!("Note: Commits were not pushed to GitHub. Use --push to push changes.");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load(Some(&config_path))
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;

    // Credentials are checked before anything touches the network or a repository
    if cli.command.needs_token() {
        config.require_token()?;
    }

    let pacing = if cli.no_pacing || !config.preferences.pacing {
        Pacing::Disabled
    } else {
        Pacing::human()
    };
    let token = config.token().map(str::to_string);
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Commit {
            repo,
            date,
            message,
            file,
            content,
            push,
        } => {
            let (day, time) = parse_commit_date(&date)?;
            let mut request = BackdateRequest::new(day);
            request.time = time;
            request.message = message;
            request.file_path = file;
            request.content = content;

            let target = Target { repo, push, pacing, token };
            let result = backdate(target, request).await?;
            if result.success(day) == Some(true) {
                println!("Successfully created backdated commit for {}", day);
                print_push_note(push);
            } else {
                print!("{}", report::execution_report(&result));
                return Err(anyhow!("failed to create backdated commit for {}", day));
            }
        }

        Commands::Bulk {
            repo,
            start_date,
            end_date,
            count,
            push,
        } => {
            let range = DateRange::parse(&start_date, &end_date)?;
            let schedule = {
                let mut rng = StdRng::from_entropy();
                app::plan_range(&app::bulk_generator(count), &range, &mut rng)
            };
            println!("Bulk backdating {} dates from {} to {}", range.len(), range.start(), range.end());
            print!("{}", report::schedule_report(&schedule.summary()));

            let result = execute(Target { repo, push, pacing, token }, schedule).await?;
            print!("{}", report::execution_report(&result));
            print_push_note(push);
        }

        Commands::Natural {
            repo,
            start_date,
            end_date,
            reference_user,
            max_daily_commits,
            push,
        } => {
            let range = DateRange::parse(&start_date, &end_date)?;
            let cap = max_daily_commits.unwrap_or(config.preferences.max_daily_commits);
            println!("Creating natural commit streak pattern from {} to {}", range.start(), range.end());
            println!("Repository: {}", repo.display());

            let generator = match reference_user.as_deref() {
                Some(handle) => {
                    println!("Using {}'s commit pattern as reference", handle);
                    let manager = StreakManager::new(github_client(&config)?);
                    manager.natural_generator(Some(handle), cap, today).await
                }
                None => ScheduleGenerator::new(ScheduleMode::Natural, cap),
            };
            if let Some(profile) = generator.profile() {
                print!("{}", report::profile_report(profile));
            }

            let schedule = {
                let mut rng = StdRng::from_entropy();
                app::plan_range(&generator, &range, &mut rng)
            };
            println!("Generated natural streak pattern from {} to {}:", range.start(), range.end());
            print!("{}", report::schedule_report(&schedule.summary()));

            let result = execute(Target { repo, push, pacing, token }, schedule).await?;
            print!("{}", report::execution_report(&result));
            print_push_note(push);
        }

        Commands::Analyze { username } => {
            let manager = StreakManager::new(github_client(&config)?);
            let summary = manager.analyze(username.as_deref(), today).await?;
            print!("{}", report::analysis_report(&summary));
        }

        Commands::Fill { repo, days_back, push } => {
            let days_back = days_back.unwrap_or(config.preferences.days_back);
            println!(
                "Analyzing contribution history and filling missing dates (last {} days)...",
                days_back
            );
            let manager = StreakManager::new(github_client(&config)?);
            let mut rng = StdRng::from_entropy();
            let plan = manager.fill_plan(today, days_back, &mut rng).await?;

            if plan.is_complete() {
                println!("Your streak is already complete! No missing dates found.");
                return Ok(());
            }
            println!("Found {} missing dates in contribution history.", plan.missing.len());
            println!(
                "Will create varied commit patterns (up to {} commits per day) to look natural.",
                plan.max_daily_commits
            );
            info!("Fill schedule covers {} dates", plan.schedule.len());

            let result = execute(Target { repo, push, pacing, token }, plan.schedule).await?;
            print!("{}", report::execution_report(&result));
            print_push_note(push);
        }

        Commands::Setup { token: new_token } => {
            setup(&config_path, new_token).await?;
        }

        Commands::Repos { language } => {
            let client = github_client(&config)?;
            let repos = client.suggest_repositories(language.as_deref()).await?;
            print!("{}", report::repositories_report(&repos));
        }
    }

    Ok(())
}

/// Persist the token, then check it against the API.
///
/// Without `--token` the token already in the file is re-verified.
async fn setup(config_path: &Path, token: Option<String>) -> Result<()> {
    // The file as written, so an environment token is never persisted
    let mut stored = Config::load_from(config_path)?;
    let token = token
        .or_else(|| stored.github.token.clone())
        .ok_or_else(|| anyhow!("no token given; pass --token <token>"))?;
    stored.github.token = Some(token);
    stored.save(config_path)?;
    println!("Configuration saved to {}", config_path.display());

    println!("Testing GitHub API connection...");
    let login = github_client(&stored)?
        .who_am_i()
        .await
        .context("error connecting to GitHub API")?;
    println!("Successfully authenticated as: {}", login);
    Ok(())
}
