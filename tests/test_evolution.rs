use std::sync::Arc;

use chromoga::{
    chromosome::{Blueprint, Converter},
    crossover::UniformCrossover,
    error::GeneticError,
    evolution::{EvolutionLauncher, EvolutionOptions, LogLevel, Retention},
    mutation::SingleLocusMutation,
    population::Population,
    rng::{RandomNumberGenerator, RandomSource},
    selection::TournamentSelection,
};

type Launcher<T> = EvolutionLauncher<TournamentSelection, UniformCrossover, SingleLocusMutation<T>>;

fn launcher<T>() -> Launcher<T> {
    EvolutionLauncher::new(
        TournamentSelection::default(),
        UniformCrossover::new(),
        SingleLocusMutation::resample(),
    )
}

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

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_population_and_genotype_sizes_are_invariant() {
    for population_size in [2, 4, 10, 32] {
        let blueprint = one_max(9);
        let mut rng = RandomNumberGenerator::from_seed(population_size as u64);
        let initial = Population::random(&blueprint, population_size, &mut rng).unwrap();
        let options = EvolutionOptions::builder()
            .num_generations(15)
            .population_size(population_size)
            .crossover_rate(0.8)
            .mutation_rate(0.3)
            .build();

        let history = launcher().evolve(&options, initial, &mut rng).unwrap();

        assert_eq!(history.len(), 15);
        for population in history.iter() {
            assert_eq!(population.len(), population_size);
            assert!(population.iter().all(|c| c.genotype().len() == 9));
        }
    }
}

#[test]
fn test_elitism_never_loses_the_best() {
    init_tracing();
    let blueprint = Arc::new(
        Blueprint::new(
            6,
            |rng: &mut dyn RandomSource| rng.range(-1.0, 1.0),
            |pheno: &[f64]| -pheno.iter().map(|x| (x - 0.5).powi(2)).sum::<f64>(),
        )
        .unwrap(),
    );
    let mut rng = RandomNumberGenerator::from_seed(1234);
    let initial = Population::random(&blueprint, 12, &mut rng).unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(40)
        .population_size(12)
        .crossover_rate(0.9)
        .mutation_rate(0.8)
        .elitism(true)
        .include_initial(true)
        .log_level(LogLevel::Minimal)
        .build();

    let history = launcher().evolve(&options, initial, &mut rng).unwrap();
    let best = history.best_fitness_per_generation().unwrap();

    assert_eq!(best.len(), 41);
    for window in best.windows(2) {
        assert!(window[1] >= window[0], "{} dropped to {}", window[0], window[1]);
    }
}

#[test]
fn test_one_max_improves() {
    let blueprint = one_max(24);
    let mut rng = RandomNumberGenerator::from_seed(7);
    let initial = Population::random(&blueprint, 30, &mut rng).unwrap();
    let initial_best = initial.best_fitness().unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(60)
        .population_size(30)
        .crossover_rate(0.7)
        .mutation_rate(0.2)
        .elitism(true)
        .build();

    let history = launcher().evolve(&options, initial, &mut rng).unwrap();
    let final_best = history.last().unwrap().best_fitness().unwrap();

    assert!(final_best >= initial_best);
    assert!(final_best >= 18, "final best {}", final_best);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let blueprint = one_max(10);
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let initial = Population::random(&blueprint, 8, &mut rng).unwrap();
        let options = EvolutionOptions::builder()
            .num_generations(10)
            .population_size(8)
            .build();
        let history = launcher().evolve(&options, initial, &mut rng).unwrap();
        history.rows(|&a| a as i64)
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn test_converters_shape_the_fitness() {
    init_tracing();
    // Odd loci are read inverted, so the optimum genotype alternates 1, 0, 1, 0.
    let converters: Vec<Converter<u8>> = (0..8)
        .map(|locus| -> Converter<u8> {
            if locus % 2 == 0 {
                Arc::new(|a: &u8| *a)
            } else {
                Arc::new(|a: &u8| 1 - *a)
            }
        })
        .collect();
    let blueprint = Arc::new(
        Blueprint::new(
            8,
            |rng: &mut dyn RandomSource| rng.index(2) as u8,
            |pheno: &[u8]| pheno.iter().map(|&a| a as u32).sum::<u32>(),
        )
        .unwrap()
        .with_converters(converters)
        .unwrap(),
    );
    let mut rng = RandomNumberGenerator::from_seed(3);
    let initial = Population::random(&blueprint, 10, &mut rng).unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(5)
        .population_size(10)
        .log_level(LogLevel::Verbose)
        .build();

    let history = launcher().evolve(&options, initial, &mut rng).unwrap();
    let rows = history.rows(|&a| a as i64);

    for generation in &rows {
        for row in generation {
            for (locus, (g, p)) in row.genotype.iter().zip(&row.phenotype).enumerate() {
                if locus % 2 == 0 {
                    assert_eq!(g, p);
                } else {
                    assert_eq!(*p, 1 - g);
                }
            }
        }
    }
}

#[test]
fn test_bounded_retention() {
    let blueprint = one_max(4);
    let mut rng = RandomNumberGenerator::from_seed(11);
    let initial = Population::random(&blueprint, 4, &mut rng).unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(25)
        .population_size(4)
        .retention(Retention::Last(5))
        .build();

    let history = launcher().evolve(&options, initial, &mut rng).unwrap();
    let numbers: Vec<usize> = history.generations().map(|g| g.number).collect();

    assert_eq!(numbers, vec![21, 22, 23, 24, 25]);
}

#[test]
fn test_invalid_options_fail_before_running() {
    let blueprint = one_max(4);
    let mut rng = RandomNumberGenerator::from_seed(11);
    let initial = Population::random(&blueprint, 5, &mut rng).unwrap();
    let options = EvolutionOptions::builder().population_size(5).build();

    let mut observed = 0;
    let result = launcher().evolve_with(&options, initial, &mut rng, |_, _| observed += 1);

    assert!(matches!(result, Err(GeneticError::Configuration(_))));
    assert_eq!(observed, 0);
}

#[test]
fn test_nan_fitness_aborts_the_run() {
    let blueprint = Arc::new(
        Blueprint::new(2, |_: &mut dyn RandomSource| f64::NAN, |pheno: &[f64]| pheno[0]).unwrap(),
    );
    let mut rng = RandomNumberGenerator::from_seed(1);
    let initial = Population::random(&blueprint, 4, &mut rng).unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(3)
        .population_size(4)
        .build();

    let result = launcher().evolve(&options, initial, &mut rng);
    assert!(matches!(result, Err(GeneticError::IncomparableFitness(_))));
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize_rows_and_options() {
    let blueprint = one_max(3);
    let mut rng = RandomNumberGenerator::from_seed(2);
    let population = Population::random(&blueprint, 2, &mut rng).unwrap();

    let json = serde_json::to_string(&population.rows(|&a| a as i64)).unwrap();
    assert!(json.contains("genotype"));
    assert!(json.contains("phenotype"));

    let options = EvolutionOptions::builder().retention(Retention::Last(4)).build();
    let json = serde_json::to_string(&options).unwrap();
    let decoded: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, options);
}
