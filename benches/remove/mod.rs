use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use stabavl::IntervalTree;

use crate::Lfsr;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove");

    for n_values in [100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to remove all `n_values` entries from a tree, in
/// insertion order.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let ranges = (0..n_values).map(|_| rand.next_range()).collect::<Vec<_>>();

    let t = IntervalTree::try_from_ranges(ranges.iter().map(|r| (r.clone(), 42_usize))).unwrap();

    g.throughput(Throughput::Elements(n_values as _)); // Keys removed per second
    g.bench_function(BenchmarkId::new("n_values", n_values), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                for r in &ranges {
                    t.remove(r).unwrap();
                }
                assert!(t.is_empty());
                t
            },
            BatchSize::LargeInput,
        )
    });
}
