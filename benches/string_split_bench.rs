// ABOUTME: Criterion benchmarks for the string_split in-list rewrite
// ABOUTME: Measures placeholder scanning, value joining, and full rewrites by list size
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for in-list rewriting.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlmapper::inlist::{join_values, try_string_split, InList, InListPattern, Sequence};
use sqlmapper::models::Command;

const LIST_SIZES: [usize; 4] = [10, 100, 1_000, 10_000];

const QUERY: &str = "select p.Id, p.Name from Products p \
     where p.CategoryId in @ids and p.Discontinued = 0 \
     option (optimize for (@ids unknown))";

fn bench_join_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_values");
    for size in LIST_SIZES {
        let values: Vec<i64> = (0..size as i64).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("int64", size), &values, |b, values| {
            b.iter(|| join_values(black_box(values)));
        });
    }
    group.finish();
}

fn bench_placeholder_scan(c: &mut Criterion) {
    let pattern = InListPattern::new("ids", false).unwrap();
    c.bench_function("placeholder_scan", |b| {
        b.iter(|| pattern.rewrite(black_box(QUERY), |token| token.to_owned()));
    });
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_split_rewrite");
    for size in LIST_SIZES {
        let values: Vec<i32> = (0..size as i32).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("int32", size), &values, |b, values| {
            b.iter(|| {
                let mut command = Command::new(QUERY);
                let mut list = InList::from(values.clone());
                try_string_split(&mut command, "ids", false, &mut list, 1)
            });
        });

        group.bench_with_input(BenchmarkId::new("int32_pending", size), &values, |b, values| {
            b.iter(|| {
                let mut command = Command::new(QUERY);
                let mut list = InList::from(Sequence::pending(values.clone()));
                try_string_split(&mut command, "ids", false, &mut list, 1)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_join_values, bench_placeholder_scan, bench_rewrite);
criterion_main!(benches);
