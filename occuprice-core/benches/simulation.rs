use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use occuprice_core::{occupancy, Dataset, Observation, PriceSimulator, SimulationConfig};

fn bench_simulate(c: &mut Criterion) {
    let simulator = PriceSimulator::new(SimulationConfig::default());
    let mut group = c.benchmark_group("simulate");

    for periods in [10usize, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(periods), &periods, |b, &periods| {
            b.iter(|| simulator.simulate(black_box(0.62), periods))
        });
    }
    group.finish();
}

fn bench_occupancy_rates(c: &mut Criterion) {
    let dataset: Dataset = (1..=10_000u32)
        .map(|id| Observation::new(id, "BHMBCCMKT01", 100 + id % 400, id % 350))
        .collect();

    c.bench_function("occupancy_rates_10k", |b| {
        b.iter(|| occupancy::occupancy_rates(black_box(&dataset)).and_then(|r| r.mean()))
    });
}

criterion_group!(benches, bench_simulate, bench_occupancy_rates);
criterion_main!(benches);
