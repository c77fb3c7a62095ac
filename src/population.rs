//! # Population
//!
//! A `Population` is the ordered, non-empty collection of chromosomes making up one
//! generation. Populations are created once and then only read: each evolution step
//! builds a new population from clones, it never edits the one it was given.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::trace;

use crate::chromosome::{compare_fitness, Allele, Blueprint, Chromosome, ChromosomeRows, Fitness};
use crate::error::{GeneticError, OptionExt, Result};
use crate::rng::RandomSource;

/// An ordered, non-empty sequence of chromosomes.
#[derive(Debug, Clone)]
pub struct Population<T, S> {
    chromosomes: Vec<Chromosome<T, S>>,
}

impl<T, S> Population<T, S>
where
    T: Allele,
    S: Fitness,
{
    /// Builds `size` independently initialised chromosomes.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `size` is 0.
    pub fn random(
        blueprint: &Arc<Blueprint<T, S>>,
        size: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }

        trace!(size, chromosome_size = blueprint.size(), "Creating random population");

        let chromosomes = (0..size)
            .map(|_| Chromosome::new(blueprint, rng))
            .collect();

        Ok(Self { chromosomes })
    }

    /// Wraps existing chromosomes.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `chromosomes` is empty.
    pub fn from_chromosomes(chromosomes: Vec<Chromosome<T, S>>) -> Result<Self> {
        if chromosomes.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(Self { chromosomes })
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome<T, S>> {
        self.chromosomes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome<T, S>> {
        self.chromosomes.get(index)
    }

    pub fn as_slice(&self) -> &[Chromosome<T, S>] {
        &self.chromosomes
    }

    pub fn into_inner(self) -> Vec<Chromosome<T, S>> {
        self.chromosomes
    }

    /// Evaluates every chromosome, in population order.
    ///
    /// Evaluation runs on the rayon pool once the population holds at least
    /// `parallel_threshold` chromosomes.
    pub fn fitness_values(&self, parallel_threshold: usize) -> Vec<S> {
        if self.chromosomes.len() >= parallel_threshold {
            self.chromosomes.par_iter().map(Chromosome::fitness).collect()
        } else {
            self.chromosomes.iter().map(Chromosome::fitness).collect()
        }
    }

    /// Index of the chromosome with the highest fitness. Ties go to the earliest index.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::IncomparableFitness` if two fitness values cannot be
    /// ordered.
    pub fn best_index(&self) -> Result<usize> {
        self.best_index_by(true, usize::MAX)
    }

    /// Same as `best_index`, evaluating fitness in parallel past `parallel_threshold`.
    pub fn best_index_with_threshold(&self, parallel_threshold: usize) -> Result<usize> {
        self.best_index_by(true, parallel_threshold)
    }

    /// Index of the fittest chromosome in the given direction: the highest fitness
    /// when `higher_is_better`, the lowest otherwise. Ties go to the earliest index.
    pub fn best_index_by(
        &self,
        higher_is_better: bool,
        parallel_threshold: usize,
    ) -> Result<usize> {
        let fitness = self.fitness_values(parallel_threshold);
        fittest(&fitness, higher_is_better)
    }

    /// The chromosome with the highest fitness. Ties go to the earliest one.
    pub fn best(&self) -> Result<&Chromosome<T, S>> {
        self.best_by(true)
    }

    /// The fittest chromosome in the given direction. Ties go to the earliest one.
    pub fn best_by(&self, higher_is_better: bool) -> Result<&Chromosome<T, S>> {
        let index = self.best_index_by(higher_is_better, usize::MAX)?;
        self.chromosomes
            .get(index)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// The highest fitness in the population.
    pub fn best_fitness(&self) -> Result<S> {
        self.best_fitness_by(true)
    }

    /// The best fitness in the given direction.
    pub fn best_fitness_by(&self, higher_is_better: bool) -> Result<S> {
        self.best_by(higher_is_better).map(Chromosome::fitness)
    }

    /// Integer projection of every chromosome, in population order.
    pub fn rows<F>(&self, to_int: F) -> Vec<ChromosomeRows>
    where
        F: Fn(&T) -> i64,
    {
        self.chromosomes
            .iter()
            .map(|chromosome| chromosome.rows(&to_int))
            .collect()
    }
}

impl<'a, T, S> IntoIterator for &'a Population<T, S> {
    type Item = &'a Chromosome<T, S>;
    type IntoIter = std::slice::Iter<'a, Chromosome<T, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}

/// Linear scan for the largest (or, with `higher_is_better` off, the smallest)
/// value, keeping the first on ties.
pub(crate) fn fittest<S: Fitness>(values: &[S], higher_is_better: bool) -> Result<usize> {
    let wanted = if higher_is_better {
        Ordering::Greater
    } else {
        Ordering::Less
    };
    let mut best = 0;
    let first = values.first().ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
    let mut best_value = first;

    for (index, value) in values.iter().enumerate().skip(1) {
        if compare_fitness(value, best_value)? == wanted {
            best = index;
            best_value = value;
        }
    }

    Ok(best)
}
