use std::ops::Range;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use stabavl::IntervalTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, "distinct", n_values, Lfsr::next_range);
        bench_param(&mut g, "clustered", n_values, Lfsr::next_clustered_range);
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// intervals into an empty tree.
fn bench_param<M, F>(g: &mut BenchmarkGroup<'_, M>, bench: &'static str, n_values: usize, gen: F)
where
    M: Measurement,
    F: Fn(&mut Lfsr) -> Range<u16>,
{
    let bench_name = BenchName { bench, n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (IntervalTree::default(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.insert(gen(&mut rand), 42_usize).unwrap();
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
