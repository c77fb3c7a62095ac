//! # History
//!
//! The ordered record of the populations produced by a run. Entries are shared,
//! read-only snapshots: the driver never touches a population again once it has
//! been recorded.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::chromosome::{Allele, ChromosomeRows, Fitness};
use crate::error::Result;
use crate::evolution::options::Retention;
use crate::population::Population;

/// A population tagged with the generation that produced it.
///
/// Generation 0 is the starting population; generation `g` is the result of the
/// `g`-th evolution step.
#[derive(Debug, Clone)]
pub struct Generation<T, S> {
    pub number: usize,
    pub population: Arc<Population<T, S>>,
}

#[derive(Debug, Clone)]
pub struct History<T, S> {
    entries: VecDeque<Generation<T, S>>,
    retention: Retention,
    higher_is_better: bool,
}

impl<T, S> History<T, S>
where
    T: Allele,
    S: Fitness,
{
    /// Creates an empty history that ranks higher fitness as better.
    ///
    /// The deque grows with the run; a `Retention::Last(n)` bound only caps how
    /// many entries are kept.
    pub fn new(retention: Retention) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
            higher_is_better: true,
        }
    }

    /// Sets the direction used by `best_fitness_per_generation`.
    pub fn with_higher_is_better(mut self, higher_is_better: bool) -> Self {
        self.higher_is_better = higher_is_better;
        self
    }

    /// Appends a generation, evicting the oldest entry when retention is bounded.
    pub fn record(&mut self, number: usize, population: Arc<Population<T, S>>) {
        self.entries.push_back(Generation { number, population });
        if let Retention::Last(n) = self.retention {
            while self.entries.len() > n {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn higher_is_better(&self) -> bool {
        self.higher_is_better
    }

    pub fn get(&self, index: usize) -> Option<&Population<T, S>> {
        self.entries.get(index).map(|entry| entry.population.as_ref())
    }

    pub fn last(&self) -> Option<&Population<T, S>> {
        self.entries.back().map(|entry| entry.population.as_ref())
    }

    /// The populations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Population<T, S>> {
        self.entries.iter().map(|entry| entry.population.as_ref())
    }

    /// The populations with their generation numbers, oldest first.
    pub fn generations(&self) -> impl Iterator<Item = &Generation<T, S>> {
        self.entries.iter()
    }

    /// Best fitness of every recorded generation, oldest first.
    pub fn best_fitness_per_generation(&self) -> Result<Vec<S>> {
        self.iter()
            .map(|population| population.best_fitness_by(self.higher_is_better))
            .collect()
    }

    /// Integer projection of every recorded generation: one row pair per
    /// chromosome, one list per generation.
    pub fn rows<F>(&self, to_int: F) -> Vec<Vec<ChromosomeRows>>
    where
        F: Fn(&T) -> i64,
    {
        self.iter().map(|population| population.rows(&to_int)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::{Blueprint, Chromosome};
    use crate::rng::RandomSource;

    fn population(values: &[i32]) -> Arc<Population<i32, i32>> {
        let blueprint = Arc::new(
            Blueprint::new(1, |_: &mut dyn RandomSource| 0, |pheno: &[i32]| pheno[0]).unwrap(),
        );
        let chromosomes = values
            .iter()
            .map(|&v| Chromosome::from_genotype(&blueprint, vec![v]).unwrap())
            .collect();
        Arc::new(Population::from_chromosomes(chromosomes).unwrap())
    }

    #[test]
    fn test_unbounded_history_keeps_everything() {
        let mut history = History::new(Retention::All);
        for generation in 1..=5 {
            history.record(generation, population(&[generation as i32, 0]));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(
            history.best_fitness_per_generation().unwrap(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(history.generations().next().unwrap().number, 1);
    }

    #[test]
    fn test_bounded_history_evicts_oldest() {
        let mut history = History::new(Retention::Last(2));
        for generation in 1..=5 {
            history.record(generation, population(&[generation as i32, 0]));
        }

        assert_eq!(history.len(), 2);
        let numbers: Vec<usize> = history.generations().map(|g| g.number).collect();
        assert_eq!(numbers, vec![4, 5]);
        assert_eq!(history.last().unwrap().best_fitness().unwrap(), 5);
        assert_eq!(history.get(0).unwrap().best_fitness().unwrap(), 4);
    }

    #[test]
    fn test_best_fitness_follows_direction() {
        let mut history = History::new(Retention::All).with_higher_is_better(false);
        history.record(1, population(&[7, 2, 5]));
        history.record(2, population(&[3, 1, 8]));

        assert!(!history.higher_is_better());
        assert_eq!(history.best_fitness_per_generation().unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_huge_retention_bound_does_not_preallocate() {
        let mut history = History::new(Retention::Last(usize::MAX));
        for generation in 1..=3 {
            history.record(generation, population(&[generation as i32, 0]));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.retention(), Retention::Last(usize::MAX));
    }

    #[test]
    fn test_rows_per_generation() {
        let mut history = History::new(Retention::All);
        history.record(0, population(&[1, 2]));
        history.record(1, population(&[3, 4]));

        let rows = history.rows(|&a| a as i64);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].genotype, vec![3]);
        assert_eq!(rows[1][1].phenotype, vec![4]);
    }
}
