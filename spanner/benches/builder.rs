use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spanner::trace::{build_request_trees, DefaultIdGenerator};
use std::hint::black_box;
use std::num::NonZeroUsize;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_request_trees");
    let generator = DefaultIdGenerator::new();

    for count in [1, 10, 100] {
        let Some(trees) = NonZeroUsize::new(count) else {
            continue;
        };
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| black_box(build_request_trees(&generator, trees)))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
