use common::RowId;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storage::index::{build_index, IndexKind};

const ROWS: usize = 10_000;

fn column_values() -> Vec<String> {
    (0..ROWS).map(|i| format!("user-{}", i % 1_000)).collect()
}

fn lookup_benchmark(c: &mut Criterion) {
    let values = column_values();
    let mut group = c.benchmark_group("lookup");

    for kind in [IndexKind::Ordered, IndexKind::Hash] {
        let index = build_index(kind, "name", &values);
        group.bench_with_input(BenchmarkId::new("index", kind), &index, |b, index| {
            b.iter(|| index.scan_key(black_box("user-512")))
        });
    }

    group.bench_function("scan", |b| {
        b.iter(|| {
            values
                .iter()
                .enumerate()
                .filter(|(_, value)| value.as_str() == black_box("user-512"))
                .map(|(position, _)| RowId(position))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn insert_benchmark(c: &mut Criterion) {
    let values = column_values();

    for kind in [IndexKind::Ordered, IndexKind::Hash] {
        c.bench_function(&format!("build_{}", kind), |b| {
            b.iter(|| build_index(kind, "name", black_box(&values)))
        });
    }
}

criterion_group!(benches, lookup_benchmark, insert_benchmark);
criterion_main!(benches);
