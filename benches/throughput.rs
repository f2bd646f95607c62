use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use roster::{
    record::UserRecord,
    store::{RecordStore, sqlite::SqliteStore},
};

fn user(i: u64) -> UserRecord {
    UserRecord::new(
        format!("id{i}"),
        format!("User{i}"),
        format!("user{i}@x.com"),
        "CS",
    )
}

fn bench_upserts(c: &mut Criterion) {
    c.bench_function("store_upsert_5k", |b| {
        b.iter(|| {
            let mut store = SqliteStore::open_in_memory().expect("open");
            for i in 0..5_000u64 {
                store.upsert(&user(i)).expect("upsert");
            }
        });
    });
}

fn bench_replacing_upserts(c: &mut Criterion) {
    c.bench_function("store_replace_5k", |b| {
        b.iter(|| {
            let mut store = SqliteStore::open_in_memory().expect("open");
            for i in 0..5_000u64 {
                store.upsert(&user(i % 100)).expect("upsert");
            }
        });
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");

    for n in [10u64, 100, 1_000] {
        let mut store = SqliteStore::open_in_memory().expect("open");
        for i in 0..n {
            store.upsert(&user(i)).expect("seed");
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let _ = store.all().expect("scan");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_upserts, bench_replacing_upserts, bench_full_scan);
criterion_main!(benches);
