use crate::chromosome::{Allele, Chromosome, Fitness};
use crate::crossover::crossover_strategy::CrossoverStrategy;
use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;

/// Locus-independent uniform crossover.
///
/// Every locus flips its own coin; on heads the two parents swap their alleles at
/// that locus, on tails both keep theirs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chromoga::chromosome::{Blueprint, Chromosome};
/// use chromoga::crossover::{CrossoverStrategy, UniformCrossover};
/// use chromoga::rng::{RandomSource, ScriptedRng};
///
/// let blueprint = Arc::new(
///     Blueprint::new(3, |_: &mut dyn RandomSource| 0, |pheno: &[i32]| pheno.iter().sum::<i32>())
///         .unwrap(),
/// );
/// let mut a = Chromosome::from_genotype(&blueprint, vec![1, 2, 3]).unwrap();
/// let mut b = Chromosome::from_genotype(&blueprint, vec![4, 5, 6]).unwrap();
///
/// let mut rng = ScriptedRng::new().with_coins(vec![true, false, true]);
/// UniformCrossover::new().crossover(&mut a, &mut b, &mut rng).unwrap();
///
/// assert_eq!(a.genotype(), &[4, 2, 6]);
/// assert_eq!(b.genotype(), &[1, 5, 3]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct UniformCrossover {
    // No fields needed
}

impl UniformCrossover {
    pub fn new() -> Self {
        Self {}
    }
}

impl<T, S> CrossoverStrategy<T, S> for UniformCrossover
where
    T: Allele,
    S: Fitness,
{
    fn crossover(
        &self,
        first: &mut Chromosome<T, S>,
        second: &mut Chromosome<T, S>,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        if first.len() != second.len() {
            return Err(GeneticError::GenotypeLength {
                expected: first.len(),
                found: second.len(),
            });
        }

        first
            .genotype_mut()
            .iter_mut()
            .zip(second.genotype_mut().iter_mut())
            .for_each(|(a, b)| {
                if rng.coin() {
                    std::mem::swap(a, b);
                }
            });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chromosome::Blueprint;
    use crate::rng::{RandomNumberGenerator, ScriptedRng};

    fn blueprint(size: usize) -> Arc<Blueprint<i32, i32>> {
        Arc::new(
            Blueprint::new(size, |_: &mut dyn RandomSource| 0, |pheno: &[i32]| {
                pheno.iter().sum::<i32>()
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_full_swap() {
        let blueprint = blueprint(3);
        let mut a = Chromosome::from_genotype(&blueprint, vec![1, 2, 3]).unwrap();
        let mut b = Chromosome::from_genotype(&blueprint, vec![4, 5, 6]).unwrap();
        let mut rng = ScriptedRng::new().with_coins(vec![true]);

        UniformCrossover::new().crossover(&mut a, &mut b, &mut rng).unwrap();

        assert_eq!(a.genotype(), &[4, 5, 6]);
        assert_eq!(b.genotype(), &[1, 2, 3]);
    }

    #[test]
    fn test_no_swap() {
        let blueprint = blueprint(3);
        let mut a = Chromosome::from_genotype(&blueprint, vec![1, 2, 3]).unwrap();
        let mut b = Chromosome::from_genotype(&blueprint, vec![4, 5, 6]).unwrap();
        let mut rng = ScriptedRng::new().with_coins(vec![false]);

        UniformCrossover::new().crossover(&mut a, &mut b, &mut rng).unwrap();

        assert_eq!(a.genotype(), &[1, 2, 3]);
        assert_eq!(b.genotype(), &[4, 5, 6]);
    }

    #[test]
    fn test_alleles_are_conserved() {
        let blueprint = blueprint(20);
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut a = Chromosome::from_genotype(&blueprint, (0..20).collect()).unwrap();
        let mut b = Chromosome::from_genotype(&blueprint, (100..120).collect()).unwrap();

        UniformCrossover::new().crossover(&mut a, &mut b, &mut rng).unwrap();

        for locus in 0..20 {
            let mut pair = [a.genotype()[locus], b.genotype()[locus]];
            pair.sort_unstable();
            assert_eq!(pair, [locus as i32, locus as i32 + 100]);
        }
    }

    #[test]
    fn test_length_mismatch_leaves_operands_untouched() {
        let short = blueprint(2);
        let long = blueprint(3);
        let mut a = Chromosome::from_genotype(&short, vec![1, 2]).unwrap();
        let mut b = Chromosome::from_genotype(&long, vec![4, 5, 6]).unwrap();
        let mut rng = ScriptedRng::new().with_coins(vec![true]);

        let result = UniformCrossover::new().crossover(&mut a, &mut b, &mut rng);

        assert_eq!(
            result.unwrap_err(),
            GeneticError::GenotypeLength {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(a.genotype(), &[1, 2]);
        assert_eq!(b.genotype(), &[4, 5, 6]);
    }
}
