//! # Mutation
//!
//! A mutation strategy alters a single chromosome in place. The generation step
//! decides whether to mutate each member of a breeding pair with `mutate_pair`:
//! two independent Bernoulli trials at the configured mutation rate.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chromoga::chromosome::{Blueprint, Chromosome};
//! use chromoga::mutation::{MutationStrategy, SingleLocusMutation};
//! use chromoga::rng::{RandomSource, ScriptedRng};
//!
//! let blueprint = Arc::new(
//!     Blueprint::new(5, |_: &mut dyn RandomSource| 0, |pheno: &[i32]| pheno.iter().sum::<i32>())
//!         .unwrap(),
//! );
//! let mut chromosome = Chromosome::from_genotype(&blueprint, vec![0; 5]).unwrap();
//!
//! let mutation = SingleLocusMutation::with_replacement(|_: &mut dyn RandomSource| 99);
//! let mut rng = ScriptedRng::new().with_indices(vec![2]);
//! mutation.mutate(&mut chromosome, &mut rng).unwrap();
//!
//! assert_eq!(chromosome.genotype(), &[0, 0, 99, 0, 0]);
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

use tracing::trace;

use crate::chromosome::{Allele, AlleleFn, Chromosome, Fitness};
use crate::error::Result;
use crate::rng::RandomSource;

/// Trait for mutation strategies.
pub trait MutationStrategy<T, S>: Debug + Send + Sync
where
    T: Allele,
    S: Fitness,
{
    /// Mutates `chromosome` in place.
    fn mutate(&self, chromosome: &mut Chromosome<T, S>, rng: &mut dyn RandomSource) -> Result<()>;
}

/// Replaces one uniformly chosen locus.
///
/// The new allele comes from the caller supplied producer, or from the chromosome's
/// own allele initializer when there is none.
#[derive(Clone)]
pub struct SingleLocusMutation<T> {
    replacement: Option<AlleleFn<T>>,
}

impl<T> SingleLocusMutation<T> {
    /// Redraws the mutated locus from the chromosome's allele initializer.
    pub fn resample() -> Self {
        Self { replacement: None }
    }

    /// Fills the mutated locus with the value returned by `producer`.
    pub fn with_replacement<F>(producer: F) -> Self
    where
        F: Fn(&mut dyn RandomSource) -> T + Send + Sync + 'static,
    {
        Self {
            replacement: Some(Arc::new(producer)),
        }
    }
}

impl<T> Default for SingleLocusMutation<T> {
    fn default() -> Self {
        Self::resample()
    }
}

impl<T> Debug for SingleLocusMutation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.replacement.is_some() {
            "replacement"
        } else {
            "resample"
        };
        f.debug_struct("SingleLocusMutation")
            .field("source", &source)
            .finish()
    }
}

impl<T, S> MutationStrategy<T, S> for SingleLocusMutation<T>
where
    T: Allele,
    S: Fitness,
{
    fn mutate(&self, chromosome: &mut Chromosome<T, S>, rng: &mut dyn RandomSource) -> Result<()> {
        let locus = match &self.replacement {
            Some(producer) => chromosome.mutate_with(rng, |rng| producer(rng)),
            None => chromosome.mutate(rng),
        };
        trace!(locus, "Mutated locus");
        Ok(())
    }
}

/// Applies `strategy` to each member of a pair with probability `rate`.
///
/// The two draws are independent: mutating `first` says nothing about `second`.
/// Returns which of the two were mutated.
pub fn mutate_pair<T, S, M>(
    strategy: &M,
    first: &mut Chromosome<T, S>,
    second: &mut Chromosome<T, S>,
    rate: f64,
    rng: &mut dyn RandomSource,
) -> Result<(bool, bool)>
where
    T: Allele,
    S: Fitness,
    M: MutationStrategy<T, S> + ?Sized,
{
    let mutate_first = rng.unit() < rate;
    if mutate_first {
        strategy.mutate(first, rng)?;
    }

    let mutate_second = rng.unit() < rate;
    if mutate_second {
        strategy.mutate(second, rng)?;
    }

    Ok((mutate_first, mutate_second))
}
