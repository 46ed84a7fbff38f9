/// Benchmark module for schedule generation, streak analysis and commit execution.
use criterion::{criterion_group, criterion_main, Criterion};
use git2::Repository;
use gitstreak::commit::{plan_commits, CommitBatchExecutor, GitRepository, Pacing};
use gitstreak::types::{ActivityProfile, ContributionDay, DayPlan};
use gitstreak::utils::DateRange;
use gitstreak::{analyze_streak, ScheduleGenerator, ScheduleMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use tempfile::TempDir;

fn year() -> DateRange {
    DateRange::parse("2023-01-01", "2023-12-31").unwrap()
}

/// A year of alternating busy and idle stretches
fn contribution_history() -> Vec<ContributionDay> {
    year()
        .iter()
        .enumerate()
        .map(|(i, date)| ContributionDay::new(date, if i % 11 < 8 { (i % 5) as u32 } else { 0 }))
        .collect()
}

/// Benchmark schedule generation in both modes
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_generation");
    let range = year();

    group.bench_function("bulk_year", |b| {
        let generator = ScheduleGenerator::new(ScheduleMode::Bulk, 5);
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| generator.generate(black_box(&range), &mut rng));
    });

    group.bench_function("natural_year", |b| {
        let generator = ScheduleGenerator::new(ScheduleMode::Natural, 10);
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| generator.generate(black_box(&range), &mut rng));
    });

    group.bench_function("natural_year_with_profile", |b| {
        let profile = ActivityProfile::new([4.0, 5.5, 6.0, 3.0, 1.5, 0.4, 0.2]);
        let generator = ScheduleGenerator::new(ScheduleMode::Natural, 10).with_profile(profile);
        let mut rng = StdRng::seed_from_u64(3);
        b.iter(|| generator.generate(black_box(&range), &mut rng));
    });

    group.finish();
}

/// Benchmark streak analysis over a year of history
fn bench_analysis(c: &mut Criterion) {
    let history = contribution_history();
    let today = year().end();

    c.bench_function("analyze_streak_year", |b| {
        b.iter(|| analyze_streak(black_box(&history), today));
    });
}

/// Benchmark commit synthesis and a real git2-backed batch
fn bench_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_execution");
    group.sample_size(10);

    group.bench_function("plan_commits_ten", |b| {
        let plan = DayPlan::new(year().start(), 10);
        let mut rng = StdRng::seed_from_u64(4);
        b.iter(|| plan_commits(black_box(&plan), &mut rng));
    });

    group.bench_function("execute_week", |b| {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Bench User").unwrap();
            config.set_str("user.email", "bench@example.com").unwrap();
        }
        let range = DateRange::parse("2023-03-06", "2023-03-12").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let schedule = ScheduleGenerator::new(ScheduleMode::Bulk, 3).generate(&range, &mut rng);

        let vcs = GitRepository::open(temp_dir.path()).unwrap();
        let mut executor = CommitBatchExecutor::new(vcs).with_pacing(Pacing::Disabled);
        b.iter(|| executor.execute(&schedule, &mut rng));
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_analysis, bench_execution);
criterion_main!(benches);
