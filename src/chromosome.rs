//! # Chromosome
//!
//! A `Chromosome` holds a fixed-length genotype of alleles of a single type `T`. Its
//! phenotype is derived on demand by applying optional per-locus converters, and its
//! fitness is derived on demand by applying the run's fitness function to the
//! phenotype. Nothing derived is cached, so reading fitness after a mutation always
//! reflects the current genotype.
//!
//! All immutable construction parameters live in a shared `Blueprint`. Cloning a
//! chromosome deep-copies the genotype and shares only the blueprint.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chromoga::chromosome::{Blueprint, Chromosome};
//! use chromoga::rng::{RandomNumberGenerator, RandomSource};
//!
//! let blueprint = Arc::new(
//!     Blueprint::new(8, |rng: &mut dyn RandomSource| rng.index(2) as u8, |pheno: &[u8]| {
//!         pheno.iter().map(|&a| a as u32).sum::<u32>()
//!     })
//!     .unwrap(),
//! );
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let mut chromosome = Chromosome::new(&blueprint, &mut rng);
//! let before = chromosome.fitness();
//!
//! chromosome.mutate(&mut rng);
//! assert_eq!(chromosome.genotype().len(), 8);
//! assert!(chromosome.fitness() <= before + 1);
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;

/// Bounds required of an allele type.
pub trait Allele: Clone + Debug + Send + Sync + 'static {}

impl<T> Allele for T where T: Clone + Debug + Send + Sync + 'static {}

/// Bounds required of a fitness type.
///
/// Only a partial order is required by the type system; values that turn out to be
/// incomparable at runtime (a `NaN` fitness, for instance) abort the operation with
/// `GeneticError::IncomparableFitness`.
pub trait Fitness: PartialOrd + Clone + Debug + Send + Sync + 'static {}

impl<S> Fitness for S where S: PartialOrd + Clone + Debug + Send + Sync + 'static {}

/// Produces one allele from a random source.
pub type AlleleFn<T> = Arc<dyn Fn(&mut dyn RandomSource) -> T + Send + Sync>;

/// Maps a phenotype to its fitness.
pub type FitnessFn<T, S> = Arc<dyn Fn(&[T]) -> S + Send + Sync>;

/// Maps the allele at one locus to its phenotype value.
pub type Converter<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// Genotype to phenotype mapping of a chromosome.
#[derive(Clone)]
pub enum Converters<T> {
    /// The phenotype is the genotype.
    Identity,
    /// One converter per locus, applied elementwise.
    PerLocus(Vec<Converter<T>>),
}

impl<T> Debug for Converters<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converters::Identity => write!(f, "Identity"),
            Converters::PerLocus(converters) => write!(f, "PerLocus({})", converters.len()),
        }
    }
}

/// The immutable construction parameters shared by every chromosome of a run.
#[derive(Clone)]
pub struct Blueprint<T, S> {
    size: usize,
    initializer: AlleleFn<T>,
    fitness: FitnessFn<T, S>,
    converters: Converters<T>,
}

impl<T, S> Blueprint<T, S>
where
    T: Allele,
    S: Fitness,
{
    /// Creates a blueprint for chromosomes of `size` loci with identity converters.
    ///
    /// # Arguments
    ///
    /// * `size` - The genotype length. Must be at least 1.
    /// * `initializer` - Produces one random allele; called once per locus at
    ///   construction and again when a mutation resamples a locus.
    /// * `fitness` - Maps a phenotype to its fitness.
    ///
    /// Both closures must be `Send + Sync`: populations at or above the configured
    /// `parallel_threshold` evaluate fitness on the rayon pool. Everything else in a
    /// run happens on the calling thread, so the closures only need to be pure, not
    /// synchronised.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `size` is 0.
    pub fn new<I, F>(size: usize, initializer: I, fitness: F) -> Result<Self>
    where
        I: Fn(&mut dyn RandomSource) -> T + Send + Sync + 'static,
        F: Fn(&[T]) -> S + Send + Sync + 'static,
    {
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Chromosome size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            size,
            initializer: Arc::new(initializer),
            fitness: Arc::new(fitness),
            converters: Converters::Identity,
        })
    }

    /// Installs one converter per locus.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the number of converters differs from
    /// the genotype length.
    pub fn with_converters(mut self, converters: Vec<Converter<T>>) -> Result<Self> {
        if converters.len() != self.size {
            return Err(GeneticError::Configuration(format!(
                "Expected {} converters, one per locus, got {}",
                self.size,
                converters.len()
            )));
        }
        self.converters = Converters::PerLocus(converters);
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn converters(&self) -> &Converters<T> {
        &self.converters
    }

    /// Draws one allele from the initializer.
    pub fn sample_allele(&self, rng: &mut dyn RandomSource) -> T {
        (self.initializer)(rng)
    }

    /// Applies the fitness function to a phenotype.
    pub fn evaluate(&self, phenotype: &[T]) -> S {
        (self.fitness)(phenotype)
    }
}

impl<T, S> Debug for Blueprint<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("size", &self.size)
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}

/// Orders two fitness values, failing when they are incomparable.
pub fn compare_fitness<S: Fitness>(a: &S, b: &S) -> Result<Ordering> {
    a.partial_cmp(b).ok_or_else(|| {
        GeneticError::IncomparableFitness(format!("cannot order {:?} and {:?}", a, b))
    })
}

/// Integer projection of a chromosome, one row for the genotype and one for the
/// phenotype. This is what heat map renderers and exporters consume.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeRows {
    pub genotype: Vec<i64>,
    pub phenotype: Vec<i64>,
}

/// A fixed-length genotype together with the blueprint it was built from.
#[derive(Clone)]
pub struct Chromosome<T, S> {
    genotype: Vec<T>,
    blueprint: Arc<Blueprint<T, S>>,
}

impl<T, S> Chromosome<T, S>
where
    T: Allele,
    S: Fitness,
{
    /// Creates a chromosome whose loci are drawn independently from the
    /// blueprint's initializer.
    pub fn new(blueprint: &Arc<Blueprint<T, S>>, rng: &mut dyn RandomSource) -> Self {
        let genotype = (0..blueprint.size)
            .map(|_| blueprint.sample_allele(rng))
            .collect();

        Self {
            genotype,
            blueprint: Arc::clone(blueprint),
        }
    }

    /// Creates a chromosome from an explicit genotype.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::GenotypeLength` if the genotype does not have exactly
    /// `blueprint.size()` loci.
    pub fn from_genotype(blueprint: &Arc<Blueprint<T, S>>, genotype: Vec<T>) -> Result<Self> {
        if genotype.len() != blueprint.size {
            return Err(GeneticError::GenotypeLength {
                expected: blueprint.size,
                found: genotype.len(),
            });
        }

        Ok(Self {
            genotype,
            blueprint: Arc::clone(blueprint),
        })
    }

    pub fn blueprint(&self) -> &Arc<Blueprint<T, S>> {
        &self.blueprint
    }

    pub fn len(&self) -> usize {
        self.genotype.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genotype.is_empty()
    }

    pub fn genotype(&self) -> &[T] {
        &self.genotype
    }

    /// Mutable access to the alleles. A slice cannot grow or shrink, so the
    /// genotype length is preserved.
    pub fn genotype_mut(&mut self) -> &mut [T] {
        &mut self.genotype
    }

    /// Replaces the allele at `locus`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `locus` is out of range.
    pub fn set_allele(&mut self, locus: usize, allele: T) -> Result<()> {
        let len = self.genotype.len();
        let slot = self.genotype.get_mut(locus).ok_or_else(|| {
            GeneticError::Configuration(format!(
                "Locus {} is out of range for a genotype of {} loci",
                locus, len
            ))
        })?;
        *slot = allele;
        Ok(())
    }

    /// The phenotype: the genotype passed through the per-locus converters.
    ///
    /// Borrows the genotype when the converters are the identity.
    pub fn phenotype(&self) -> Cow<'_, [T]> {
        match &self.blueprint.converters {
            Converters::Identity => Cow::Borrowed(&self.genotype),
            Converters::PerLocus(converters) => Cow::Owned(
                self.genotype
                    .iter()
                    .zip(converters)
                    .map(|(allele, convert)| convert(allele))
                    .collect(),
            ),
        }
    }

    /// Evaluates the fitness function against the current phenotype.
    pub fn fitness(&self) -> S {
        let phenotype = self.phenotype();
        self.blueprint.evaluate(&phenotype)
    }

    /// Orders this chromosome's fitness against another's.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::IncomparableFitness` if the two values cannot be ordered.
    pub fn compare_fitness(&self, other: &Self) -> Result<Ordering> {
        compare_fitness(&self.fitness(), &other.fitness())
    }

    /// Replaces one uniformly chosen locus with a fresh draw from the initializer.
    ///
    /// Returns the mutated locus.
    pub fn mutate(&mut self, rng: &mut dyn RandomSource) -> usize {
        let locus = rng.index(self.genotype.len());
        self.genotype[locus] = self.blueprint.sample_allele(rng);
        locus
    }

    /// Replaces one uniformly chosen locus with the value produced by `producer`.
    ///
    /// Returns the mutated locus.
    pub fn mutate_with<F>(&mut self, rng: &mut dyn RandomSource, producer: F) -> usize
    where
        F: FnOnce(&mut dyn RandomSource) -> T,
    {
        let locus = rng.index(self.genotype.len());
        self.genotype[locus] = producer(rng);
        locus
    }

    /// Projects the genotype and phenotype onto integers.
    pub fn rows<F>(&self, to_int: F) -> ChromosomeRows
    where
        F: Fn(&T) -> i64,
    {
        ChromosomeRows {
            genotype: self.genotype.iter().map(&to_int).collect(),
            phenotype: self.phenotype().iter().map(&to_int).collect(),
        }
    }
}

impl<T: Debug, S> Debug for Chromosome<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chromosome")
            .field("genotype", &self.genotype)
            .finish_non_exhaustive()
    }
}
