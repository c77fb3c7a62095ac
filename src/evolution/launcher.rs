use std::sync::Arc;

use tracing::{debug, error, info};

use super::{
    history::History,
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    chromosome::{Allele, Fitness},
    crossover::CrossoverStrategy,
    error::{GeneticError, Result},
    mutation::{mutate_pair, MutationStrategy},
    population::Population,
    rng::RandomSource,
    selection::SelectionStrategy,
};

/// Drives a run: one selection, crossover and mutation strategy applied to a
/// population generation after generation.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Sel, Cx, Mu> {
    selection: Sel,
    crossover: Cx,
    mutation: Mu,
}

impl<Sel, Cx, Mu> EvolutionLauncher<Sel, Cx, Mu> {
    /// Creates a new `EvolutionLauncher` from its three strategies.
    pub fn new(selection: Sel, crossover: Cx, mutation: Mu) -> Self {
        Self {
            selection,
            crossover,
            mutation,
        }
    }

    pub fn selection(&self) -> &Sel {
        &self.selection
    }

    pub fn crossover(&self) -> &Cx {
        &self.crossover
    }

    pub fn mutation(&self) -> &Mu {
        &self.mutation
    }

    /// Produces the next generation from `population`.
    ///
    /// 1. Selection draws a mating pool of clones, one per population slot.
    /// 2. The pool is cut into consecutive pairs `(0, 1), (2, 3), ...`.
    /// 3. Each pair is recombined with probability `crossover_rate`, then each
    ///    member is mutated with probability `mutation_rate`; the three draws are
    ///    independent.
    /// 4. With elitism on, the first member of the pool is dropped and a clone of
    ///    the fittest chromosome of `population` is appended. "Fittest" follows the
    ///    selection strategy's direction, so a minimising selection keeps the
    ///    lowest fitness.
    ///
    /// `population` itself is never modified.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options are invalid (see `EvolutionOptions::validate`)
    /// - The population size differs from the configured one
    /// - A strategy fails, for instance on incomparable fitness values
    pub fn step<T, S>(
        &self,
        population: &Population<T, S>,
        options: &EvolutionOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<Population<T, S>>
    where
        T: Allele,
        S: Fitness,
        Sel: SelectionStrategy<T, S>,
        Cx: CrossoverStrategy<T, S>,
        Mu: MutationStrategy<T, S>,
    {
        options.validate()?;

        if population.len() != options.get_population_size() {
            return Err(GeneticError::Configuration(format!(
                "Population holds {} chromosomes but the options expect {}",
                population.len(),
                options.get_population_size()
            )));
        }

        let mut pool = self.selection.select(population.as_slice(), rng)?;
        if pool.len() != population.len() {
            return Err(GeneticError::Evolution(format!(
                "Selection returned {} chromosomes for a population of {}",
                pool.len(),
                population.len()
            )));
        }

        for pair in pool.chunks_exact_mut(2) {
            if let [first, second] = pair {
                if rng.unit() < options.get_crossover_rate() {
                    self.crossover.crossover(first, second, rng)?;
                }
                mutate_pair(
                    &self.mutation,
                    first,
                    second,
                    options.get_mutation_rate(),
                    rng,
                )?;
            }
        }

        if options.get_elitism() {
            let best = population.best_index_by(
                self.selection.higher_is_better(),
                options.get_parallel_threshold(),
            )?;
            pool.remove(0);
            pool.push(population.as_slice()[best].clone());
        }

        Population::from_chromosomes(pool)
    }

    /// Evolves `initial` for `num_generations` steps.
    ///
    /// The returned history holds one entry per step, oldest first, preceded by
    /// `initial` when `include_initial` is set, and trimmed to the configured
    /// retention.
    pub fn evolve<T, S>(
        &self,
        options: &EvolutionOptions,
        initial: Population<T, S>,
        rng: &mut dyn RandomSource,
    ) -> Result<History<T, S>>
    where
        T: Allele,
        S: Fitness,
        Sel: SelectionStrategy<T, S>,
        Cx: CrossoverStrategy<T, S>,
        Mu: MutationStrategy<T, S>,
    {
        self.evolve_with(options, initial, rng, |_, _| {})
    }

    /// Same as `evolve`, additionally handing every new generation to `observer`
    /// together with its generation number. The observer sees every generation,
    /// including those the history later evicts.
    pub fn evolve_with<T, S, F>(
        &self,
        options: &EvolutionOptions,
        initial: Population<T, S>,
        rng: &mut dyn RandomSource,
        mut observer: F,
    ) -> Result<History<T, S>>
    where
        T: Allele,
        S: Fitness,
        Sel: SelectionStrategy<T, S>,
        Cx: CrossoverStrategy<T, S>,
        Mu: MutationStrategy<T, S>,
        F: FnMut(usize, &Population<T, S>),
    {
        options.validate()?;

        let higher_is_better = self.selection.higher_is_better();
        let mut history =
            History::new(options.get_retention()).with_higher_is_better(higher_is_better);
        let mut current = Arc::new(initial);

        if options.get_include_initial() {
            history.record(0, Arc::clone(&current));
        }

        for generation in 1..=options.get_num_generations() {
            let next = match self.step(&current, options, rng) {
                Ok(next) => Arc::new(next),
                Err(e) => {
                    error!(generation, error = %e, "Evolution step failed");
                    return Err(e);
                }
            };

            log_generation(generation, &next, options.get_log_level(), higher_is_better);
            observer(generation, next.as_ref());

            history.record(generation, Arc::clone(&next));
            current = next;
        }

        Ok(history)
    }
}

/// Reports a finished generation. Reporting never fails the run: a best fitness
/// that cannot be determined is logged as an error instead.
fn log_generation<T, S>(
    generation: usize,
    population: &Population<T, S>,
    level: &LogLevel,
    higher_is_better: bool,
) where
    T: Allele,
    S: Fitness,
{
    if *level == LogLevel::None {
        return;
    }

    match population.best_fitness_by(higher_is_better) {
        Ok(best) => info!(generation, best = ?best, "Generation complete"),
        Err(e) => error!(generation, error = %e, "Could not determine the best fitness"),
    }

    if *level == LogLevel::Verbose {
        for (index, chromosome) in population.iter().enumerate() {
            debug!(
                generation,
                index,
                genotype = ?chromosome.genotype(),
                fitness = ?chromosome.fitness(),
                "Chromosome"
            );
        }
    }
}
