//! Criterion measurements for the batch executor and result materialization
//! against an in-memory `SQLite` database. Row count comes from `BENCH_ROWS`.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_toolbox::batch::insert_many_typed;
use sql_toolbox::interaction::{create_table, fold_rows, select_rows};
use sql_toolbox::prelude::*;

const COLUMNS: [&str; 3] = ["name", "qty", "price"];
const TYPES: [LogicalType; 3] = [LogicalType::Text, LogicalType::Int, LogicalType::Double];

fn bench_row_count() -> usize {
    std::env::var("BENCH_ROWS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1000)
}

fn workload(rows: usize) -> Vec<Vec<String>> {
    (0..rows)
        .map(|i| vec![format!("item-{i}"), (i % 97).to_string(), format!("{}.25", i % 13)])
        .collect()
}

fn seeded(rows: &[Vec<String>]) -> SqliteConnection {
    let mut conn = SqliteConnection::open_in_memory().expect("open in-memory sqlite");
    create_table(&mut conn, "items", &COLUMNS, &["TEXT", "INT", "DOUBLE"]).expect("create table");
    let outcome = insert_many_typed(&mut conn, "items", &COLUMNS, rows, &TYPES).expect("seed rows");
    assert!(outcome.all_succeeded());
    conn
}

fn batch_insert(c: &mut Criterion) {
    let rows = workload(bench_row_count());
    let mut group = c.benchmark_group("batch_insert");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_with_input(BenchmarkId::new("typed", rows.len()), &rows, |b, rows| {
        b.iter_batched(
            || {
                let mut conn = SqliteConnection::open_in_memory().expect("open in-memory sqlite");
                create_table(&mut conn, "items", &COLUMNS, &["TEXT", "INT", "DOUBLE"])
                    .expect("create table");
                conn
            },
            |mut conn| {
                let outcome = insert_many_typed(&mut conn, "items", &COLUMNS, rows, &TYPES)
                    .expect("batch insert");
                black_box(outcome.succeeded)
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn materialize(c: &mut Criterion) {
    let rows = workload(bench_row_count());
    let mut conn = seeded(&rows);
    let mut group = c.benchmark_group("materialize");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("collect", |b| {
        b.iter(|| {
            let result = select_rows(&mut conn, "SELECT * FROM items", &[]).expect("select");
            black_box(result.len())
        });
    });
    group.bench_function("fold", |b| {
        b.iter(|| {
            let total = fold_rows(&mut conn, "SELECT * FROM items", &[], 0_usize, |acc, row| {
                acc + row.get("name").map_or(0, str::len)
            })
            .expect("fold");
            black_box(total)
        });
    });
    group.finish();
}

criterion_group!(benches, batch_insert, materialize);
criterion_main!(benches);
