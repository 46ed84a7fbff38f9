use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, error, info, warn};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use super::catalog::select_targets;
use super::content::synthesize_content;
use super::messages::{commit_message, MessageKind};
use super::vcs::{resolve, VcsError, VersionControl};
use crate::types::{CommitRecord, DayOutcome, DayPlan, DaySchedule, ExecutionResult, PushStatus};

/// Folder, relative to the working copy, that holds synthesized files.
pub const UPDATES_DIR: &str = "streak_updates";

/// First and last hour a drawn commit time may fall in.
pub const BUSINESS_HOURS: (u32, u32) = (9, 19);

/// File touched by a single backdated commit when none is given.
pub const DEFAULT_FILE: &str = "README.md";

/// Delay between consecutive commits on the same date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Commit back to back
    Disabled,
    /// Sleep a uniform number of seconds in `[min_secs, max_secs]`
    Human { min_secs: f64, max_secs: f64 },
}

impl Pacing {
    pub fn human() -> Self {
        Pacing::Human {
            min_secs: 1.0,
            max_secs: 5.0,
        }
    }

    /// Draw the pause before a follow-up commit, if pacing is on.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Duration> {
        match *self {
            Pacing::Disabled => None,
            Pacing::Human { min_secs, max_secs } if max_secs > min_secs && min_secs >= 0.0 => {
                Some(Duration::from_secs_f64(rng.gen_range(min_secs..=max_secs)))
            }
            Pacing::Human { min_secs, .. } => Some(Duration::from_secs_f64(min_secs.max(0.0))),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::human()
    }
}

/// Time of a synthetic commit on `date`.
///
/// An explicit time is reused unchanged; otherwise one is drawn inside
/// business hours.
pub fn commit_timestamp<R: Rng + ?Sized>(date: NaiveDate, explicit: Option<NaiveTime>, rng: &mut R) -> NaiveDateTime {
    let time = explicit.unwrap_or_else(|| {
        let (first, last) = BUSINESS_HOURS;
        let hour = rng.gen_range(first..=last);
        let minute = rng.gen_range(0..=59);
        let second = rng.gen_range(0..=59);
        NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
    });
    date.and_time(time)
}

/// A one-off backdated commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdateRequest {
    pub date: NaiveDate,
    /// Reused as-is when present
    pub time: Option<NaiveTime>,
    pub message: Option<String>,
    /// Relative to the working copy; defaults to `README.md`
    pub file_path: Option<String>,
    /// Written verbatim when present
    pub content: Option<String>,
}

impl BackdateRequest {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            message: None,
            file_path: None,
            content: None,
        }
    }
}

/// Materializes a schedule as backdated commits, one date at a time.
///
/// The executor never returns an error: every date ends up in the
/// [`ExecutionResult`] as either a success or a failure.
pub struct CommitBatchExecutor<V: VersionControl> {
    vcs: V,
    push: bool,
    pacing: Pacing,
}

impl<V: VersionControl> CommitBatchExecutor<V> {
    pub fn new(vcs: V) -> Self {
        Self {
            vcs,
            push: false,
            pacing: Pacing::default(),
        }
    }

    /// Push once after each fully committed date.
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn into_inner(self) -> V {
        self.vcs
    }

    /// Run every active date of `schedule` in ascending order.
    pub fn execute<R: Rng + ?Sized>(&mut self, schedule: &DaySchedule, rng: &mut R) -> ExecutionResult {
        let mut result = ExecutionResult::new();

        for plan in schedule.days() {
            if !plan.is_active() {
                info!("Skipping {} (no commits scheduled)", plan.date);
                result.record_skipped(plan.date);
                continue;
            }

            info!("Creating {} commits for {}", plan.commit_count, plan.date);
            let records = plan_commits(plan, rng);
            let outcome = self.run_day(plan.date, &records, rng);
            if outcome.success() {
                info!("Finished {}: {} commits", plan.date, outcome.committed);
            }
            result.record(plan.date, outcome);
        }

        result
    }

    /// Create a single backdated commit, pushing it if configured.
    pub fn backdate<R: Rng + ?Sized>(&mut self, request: &BackdateRequest, rng: &mut R) -> ExecutionResult {
        let file_path = request
            .file_path
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE.to_string());
        let content = match &request.content {
            Some(content) => content.clone(),
            None => default_content(self.vcs.workdir(), &file_path),
        };
        let message = match &request.message {
            Some(message) => message.clone(),
            None => MessageKind::Code.choose(rng).to_string(),
        };

        let record = CommitRecord {
            date: request.date,
            timestamp: commit_timestamp(request.date, request.time, rng),
            file_path,
            content,
            message,
        };

        let mut result = ExecutionResult::new();
        let outcome = self.run_day(request.date, std::slice::from_ref(&record), rng);
        result.record(request.date, outcome);
        result
    }

    fn run_day<R: Rng + ?Sized>(&mut self, date: NaiveDate, records: &[CommitRecord], rng: &mut R) -> DayOutcome {
        let mut outcome = DayOutcome {
            planned: records.len() as u32,
            committed: 0,
            push: PushStatus::NotRequested,
            error: None,
        };

        for (i, record) in records.iter().enumerate() {
            if i > 0 {
                if let Some(pause) = self.pacing.draw(rng) {
                    debug!("Pausing {:.1}s before next commit", pause.as_secs_f64());
                    thread::sleep(pause);
                }
            }

            if let Err(e) = self.apply(record) {
                error!("Error creating backdated commit for {}: {}", date, e);
                outcome.error = Some(e.to_string());
                return outcome;
            }
            outcome.committed += 1;
        }

        if self.push && outcome.committed > 0 {
            match self.vcs.push() {
                Ok(()) => outcome.push = PushStatus::Pushed,
                Err(e) => {
                    error!("Error pushing commits for {}: {}", date, e);
                    outcome.push = PushStatus::Failed;
                    outcome.error = Some(e.to_string());
                }
            }
        }

        outcome
    }

    fn apply(&mut self, record: &CommitRecord) -> Result<String, VcsError> {
        let path = Path::new(&record.file_path);
        self.vcs.write_file(path, &record.content)?;
        self.vcs.stage(path)?;
        let id = self
            .vcs
            .commit(&record.message, record.timestamp, record.timestamp)?;
        debug!("{} [{}] {}", record.timestamp, &id[..id.len().min(7)], record.message);
        Ok(id)
    }
}

/// Synthesize the commits for one date: targets, contents, messages and times.
pub fn plan_commits<R: Rng + ?Sized>(plan: &DayPlan, rng: &mut R) -> Vec<CommitRecord> {
    let total = plan.commit_count as usize;
    let day = plan.date.format("%Y-%m-%d").to_string();

    select_targets(total, rng)
        .into_iter()
        .enumerate()
        .map(|(i, target)| {
            let file_path = format!("{UPDATES_DIR}/{day}/{target}");
            let content = synthesize_content(&file_path, plan.date, i, total);
            let message = commit_message(&file_path, i, total, rng).to_string();
            CommitRecord {
                date: plan.date,
                timestamp: commit_timestamp(plan.date, plan.time, rng),
                file_path,
                content,
                message,
            }
        })
        .collect()
}

/// Append an update marker to an existing file, or create a placeholder.
fn default_content(workdir: &Path, file_path: &str) -> String {
    let now = Local::now().format("%Y-%m-%dT%H:%M:%S");
    let existing: Option<PathBuf> = resolve(workdir, Path::new(file_path)).ok();
    match existing.and_then(|path| fs::read_to_string(path).ok()) {
        Some(current) => format!("{current}\n\n<!-- Updated: {now} -->"),
        None => {
            warn!("{} does not exist yet, creating a placeholder", file_path);
            format!("# Placeholder\n\nThis file was created by gitstreak.\n\n<!-- Created: {now} -->")
        }
    }
}
