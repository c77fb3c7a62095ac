use std::fmt::Debug;

use crate::chromosome::{Allele, Chromosome, Fitness};
use crate::error::Result;
use crate::rng::RandomSource;

/// # CrossoverStrategy
///
/// The `CrossoverStrategy` trait defines how two parents exchange genetic material.
/// Both operands are modified in place.
pub trait CrossoverStrategy<T, S>: Debug + Send + Sync
where
    T: Allele,
    S: Fitness,
{
    /// Recombines the genotypes of `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::GenotypeLength` if the genotypes differ in length. In
    /// that case neither operand is modified.
    fn crossover(
        &self,
        first: &mut Chromosome<T, S>,
        second: &mut Chromosome<T, S>,
        rng: &mut dyn RandomSource,
    ) -> Result<()>;
}
