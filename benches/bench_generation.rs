use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chromoga::{
    chromosome::Blueprint,
    crossover::UniformCrossover,
    evolution::{EvolutionLauncher, EvolutionOptions},
    mutation::SingleLocusMutation,
    population::Population,
    rng::{RandomNumberGenerator, RandomSource},
    selection::TournamentSelection,
};

fn one_max(size: usize) -> Arc<Blueprint<u8, u32>> {
    Arc::new(
        Blueprint::new(
            size,
            |rng: &mut dyn RandomSource| rng.index(2) as u8,
            |pheno: &[u8]| pheno.iter().map(|&a| a as u32).sum(),
        )
        .unwrap(),
    )
}

fn bench_step(c: &mut Criterion) {
    let launcher = EvolutionLauncher::new(
        TournamentSelection::default(),
        UniformCrossover::new(),
        SingleLocusMutation::<u8>::resample(),
    );
    let blueprint = one_max(64);
    let mut rng = RandomNumberGenerator::from_seed(1);

    let mut group = c.benchmark_group("generation_step");
    for size in [10, 100, 1000, 4000].iter() {
        let population = Population::random(&blueprint, *size, &mut rng).unwrap();
        let options = EvolutionOptions::builder()
            .population_size(*size)
            .crossover_rate(0.7)
            .mutation_rate(0.05)
            .elitism(true)
            .build();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let next = launcher.step(black_box(&population), black_box(&options), &mut rng);
                assert!(next.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_evolve(c: &mut Criterion) {
    let launcher = EvolutionLauncher::new(
        TournamentSelection::default(),
        UniformCrossover::new(),
        SingleLocusMutation::<u8>::resample(),
    );
    let blueprint = one_max(32);

    c.bench_function("evolve_50_generations", |b| {
        b.iter(|| {
            let mut rng = RandomNumberGenerator::from_seed(7);
            let initial = Population::random(&blueprint, 50, &mut rng).unwrap();
            let options = EvolutionOptions::builder()
                .num_generations(50)
                .population_size(50)
                .build();
            let history = launcher.evolve(black_box(&options), initial, &mut rng);
            assert!(history.is_ok());
        })
    });
}

criterion_group!(benches, bench_step, bench_evolve);
criterion_main!(benches);
