use std::fmt::Debug;

use crate::chromosome::{Allele, Chromosome, Fitness};
use crate::error::Result;
use crate::rng::RandomSource;

/// Trait for selection strategies in genetic algorithms.
///
/// A selection strategy draws a mating pool from a population, biased towards the
/// fitter chromosomes. The pool has as many members as the population, and every
/// member is a clone: the generation step owns the pool exclusively and is free to
/// recombine and mutate it without touching the population it came from.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chromoga::chromosome::Blueprint;
/// use chromoga::population::Population;
/// use chromoga::rng::{RandomNumberGenerator, RandomSource};
/// use chromoga::selection::{SelectionStrategy, TournamentSelection};
/// use chromoga::error::Result;
///
/// fn main() -> Result<()> {
///     let blueprint = Arc::new(Blueprint::new(
///         4,
///         |rng: &mut dyn RandomSource| rng.index(10) as i32,
///         |pheno: &[i32]| pheno.iter().sum::<i32>(),
///     )?);
///
///     let mut rng = RandomNumberGenerator::from_seed(3);
///     let population = Population::random(&blueprint, 6, &mut rng)?;
///
///     let selection = TournamentSelection::default();
///     let pool = selection.select(population.as_slice(), &mut rng)?;
///
///     assert_eq!(pool.len(), 6);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<T, S>: Debug + Send + Sync
where
    T: Allele,
    S: Fitness,
{
    /// Selects `population.len()` chromosomes and returns clones of them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - Two fitness values drawn into the same comparison cannot be ordered
    fn select(
        &self,
        population: &[Chromosome<T, S>],
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Chromosome<T, S>>>;

    /// Whether this strategy favours higher fitness. The generation step uses the
    /// same direction to pick the elite and to report the best of a generation.
    fn higher_is_better(&self) -> bool {
        true
    }
}
