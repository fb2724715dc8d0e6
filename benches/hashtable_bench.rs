use chaintable::{next_prime, Hashtable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

fn benchmark_insert_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert Comparison");

    group.bench_function("Hashtable insert 10k", |b| {
        b.iter(|| {
            let mut table = Hashtable::new();
            for i in 0..10_000 {
                let key = format!("key_{}", i);
                table.put(black_box(key), black_box(i));
            }
            table
        });
    });

    group.bench_function("std::HashMap insert 10k", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..10_000 {
                let key = format!("key_{}", i);
                map.insert(black_box(key), black_box(i));
            }
            map
        });
    });

    group.finish();
}

fn benchmark_lookup_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lookup Comparison");

    let mut table = Hashtable::new();
    let mut std_map = HashMap::new();
    for i in 0..10_000 {
        let key = format!("key_{}", i);
        table.put(key.clone(), i);
        std_map.insert(key, i);
    }

    group.bench_function("Hashtable lookup", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                let key = format!("key_{}", black_box(i));
                black_box(table.get(key.as_str()));
            }
        });
    });

    group.bench_function("std::HashMap lookup", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                let key = format!("key_{}", black_box(i));
                black_box(std_map.get(key.as_str()));
            }
        });
    });

    group.finish();
}

fn benchmark_load_limits(c: &mut Criterion) {
    let mut group = c.benchmark_group("Load Limit");

    for &limit in &[0.5f32, 0.75, 1.0, 2.0] {
        group.bench_with_input(BenchmarkId::new("put+get 20k", limit), &limit, |b, &limit| {
            b.iter(|| {
                let mut table = Hashtable::with_capacity_and_load_limit(11, limit).unwrap();
                for i in 0..20_000u64 {
                    table.put(black_box(i), i);
                }
                for i in 0..20_000u64 {
                    black_box(table.get(&i));
                }
                table
            });
        });
    }

    group.finish();
}

fn benchmark_churn(c: &mut Criterion) {
    c.bench_function("Hashtable put/remove churn 10k", |b| {
        let mut table = Hashtable::with_capacity(4099).unwrap();
        b.iter(|| {
            for i in 0..10_000u64 {
                table.put(black_box(i), i);
            }
            for i in 0..10_000u64 {
                black_box(table.remove(&i));
            }
        });
    });
}

fn benchmark_next_prime(c: &mut Criterion) {
    c.bench_function("next_prime near 2^24", |b| {
        b.iter(|| black_box(next_prime(black_box(1 << 24))));
    });
}

criterion_group!(
    benches,
    benchmark_insert_comparison,
    benchmark_lookup_comparison,
    benchmark_load_limits,
    benchmark_churn,
    benchmark_next_prime
);
criterion_main!(benches);
