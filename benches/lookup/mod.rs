use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use stabavl::IntervalTree;

use crate::Lfsr;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("lookup");

    for n_values in [1_000, 10_000] {
        bench_param(&mut g, n_values, 100);
    }
}

/// Build a tree of `n_values` random intervals, then measure `n_lookups`
/// exact lookups that all hit, and `n_lookups` that all miss.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize, n_lookups: usize)
where
    M: Measurement,
{
    assert!(n_values >= n_lookups);

    let mut rand = Lfsr::default();
    let mut t = IntervalTree::default();
    for _ in 0..n_values {
        t.insert(rand.next_range(), 42_usize).unwrap();
    }

    // Continuing the LFSR sequence yields bounds never inserted into the
    // tree, while a fresh LFSR replays the inserted ranges.
    let cases: [(&str, Lfsr, bool); 2] = [("misses", rand, false), ("hits", Lfsr::default(), true)];

    for (name, rand, want) in cases {
        g.throughput(Throughput::Elements(n_lookups as _)); // Lookups per second
        g.bench_function(
            BenchmarkId::new(format!("{name}/n_values_{n_values}"), n_lookups),
            |b| {
                b.iter_batched(
                    || rand.clone(),
                    |mut rand| {
                        for _ in 0..n_lookups {
                            assert_eq!(t.contains(&rand.next_range()), want);
                        }
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
}
