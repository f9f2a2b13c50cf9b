use chrono::{DateTime, Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use piley_core::models::{Pile, PileWithTasks, Task, TaskStatus};
use piley_core::ordering::resolve_pile_order;
use piley_core::stats::build_weekly_completion_histogram;
use piley_core::upcoming::select_upcoming_tasks;

fn create_test_task(id: i64, now: DateTime<Utc>) -> Task {
    let status = match fastrand::u8(0..3) {
        0 => TaskStatus::Default,
        1 => TaskStatus::Done,
        _ => TaskStatus::Deleted,
    };
    let completions = (0..fastrand::usize(0..4))
        .map(|_| now - Duration::hours(fastrand::i64(0..24 * 14)))
        .collect();

    Task {
        id,
        title: format!("Benchmark Task {}", id),
        status,
        pile_id: id % 10,
        modified_at: now - Duration::hours(fastrand::i64(0..24 * 14)),
        reminder: fastrand::bool().then(|| now + Duration::minutes(fastrand::i64(0..10_000))),
        is_recurring: fastrand::bool(),
        completion_times: completions,
        ..Default::default()
    }
}

fn create_test_piles(pile_count: i64, tasks_per_pile: i64, now: DateTime<Utc>) -> Vec<PileWithTasks> {
    (0..pile_count)
        .map(|p| {
            let pile = Pile { id: p, name: format!("Pile {}", p), ..Default::default() };
            let tasks = (0..tasks_per_pile)
                .map(|t| create_test_task(p * tasks_per_pile + t, now))
                .collect();
            PileWithTasks::new(pile, tasks)
        })
        .collect()
}

fn bench_weekly_histogram(c: &mut Criterion) {
    fastrand::seed(7);
    let now = Utc::now();
    let mut group = c.benchmark_group("weekly_histogram");

    for size in [100usize, 1_000, 10_000] {
        let tasks: Vec<Task> = (0..size as i64).map(|id| create_test_task(id, now)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &tasks, |b, tasks| {
            b.iter(|| build_weekly_completion_histogram(black_box(tasks), black_box(now), &Utc))
        });
    }
    group.finish();
}

fn bench_upcoming_selection(c: &mut Criterion) {
    fastrand::seed(11);
    let now = Utc::now();
    let piles = create_test_piles(20, 200, now);

    c.bench_function("upcoming_selection_4000_tasks", |b| {
        b.iter(|| select_upcoming_tasks(black_box(&piles)).len())
    });
}

fn bench_pile_order(c: &mut Criterion) {
    fastrand::seed(13);
    let now = Utc::now();
    let piles = create_test_piles(200, 1, now);
    let mut order: Vec<i64> = (0..150).collect();
    fastrand::shuffle(&mut order);

    c.bench_function("resolve_pile_order_200_piles", |b| {
        b.iter(|| resolve_pile_order(black_box(&piles), black_box(&order)).len())
    });
}

criterion_group!(benches, bench_weekly_histogram, bench_upcoming_selection, bench_pile_order);
criterion_main!(benches);
