//! Performance benchmarks for classboard-engine

use classboard_engine::{Action, CollectionState, RootSnapshot, Student, User};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn users(n: u64) -> Vec<User> {
    (0..n)
        .map(|id| User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
        })
        .collect()
}

fn bench_reducers(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducers");

    for size in [100u64, 1_000, 10_000] {
        let state = CollectionState::with_items(users(size));

        group.bench_with_input(BenchmarkId::new("created", size), &state, |b, state| {
            b.iter(|| {
                state.apply(black_box(Action::Created(User {
                    id: size + 1,
                    name: "New".to_string(),
                    email: "new@example.com".to_string(),
                })))
            })
        });

        group.bench_with_input(BenchmarkId::new("updated", size), &state, |b, state| {
            b.iter(|| {
                state.apply(black_box(Action::Updated(User {
                    id: size / 2,
                    name: "Renamed".to_string(),
                    email: "renamed@example.com".to_string(),
                })))
            })
        });

        group.bench_with_input(BenchmarkId::new("deleted", size), &state, |b, state| {
            b.iter(|| state.apply(black_box(Action::Deleted(size / 2))))
        });

        group.bench_with_input(BenchmarkId::new("begin", size), &state, |b, state| {
            b.iter(|| state.apply(black_box(Action::Begin)))
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    let mut snapshot = RootSnapshot::new();
    snapshot.users = CollectionState::with_items(users(1_000));
    snapshot.students = CollectionState::with_items(
        (0..1_000).map(|id| Student::new(id, format!("Student {id}"))).collect(),
    );

    group.bench_function("clone", |b| b.iter(|| black_box(&snapshot).clone()));
    group.bench_function("to_json", |b| b.iter(|| black_box(&snapshot).to_json()));

    group.finish();
}

criterion_group!(benches, bench_reducers, bench_snapshot);
criterion_main!(benches);
