use std::cmp::Ordering;

use tracing::trace;

use crate::chromosome::{compare_fitness, Allele, Chromosome, Fitness};
use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament draws `tournament_size` contestants uniformly, with replacement,
/// and keeps the fittest. One tournament is run per slot of the mating pool, so the
/// pool has as many members as the population.
///
/// A contestant only displaces the current leader when it is strictly better. On an
/// exact tie the contestant drawn first wins, so ties are resolved deterministically
/// rather than by a coin flip.
///
/// The default is the binary tournament: two contestants, higher fitness is better.
///
/// # Examples
///
/// ```
/// use chromoga::selection::TournamentSelection;
///
/// let binary = TournamentSelection::default();
/// assert_eq!(binary.tournament_size(), 2);
///
/// let harsher = TournamentSelection::new(4, true).unwrap();
/// assert_eq!(harsher.tournament_size(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
    higher_is_better: bool,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of contestants per tournament. Must be at
    ///   least 1. A tournament size of 1 is equivalent to random selection.
    /// * `higher_is_better` - Whether higher fitness is better (true) or lower fitness
    ///   is better (false).
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize, higher_is_better: bool) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            higher_is_better,
        })
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        self.tournament_size = tournament_size;
        Ok(self)
    }

    pub fn with_lower_is_better(mut self) -> Self {
        self.higher_is_better = false;
        self
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn higher_is_better(&self) -> bool {
        self.higher_is_better
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament<T, S>(
        &self,
        population: &[Chromosome<T, S>],
        rng: &mut dyn RandomSource,
    ) -> Result<usize>
    where
        T: Allele,
        S: Fitness,
    {
        let mut winner = rng.index(population.len());
        let mut winner_fitness = population[winner].fitness();

        for _ in 1..self.tournament_size {
            let contestant = rng.index(population.len());
            let contestant_fitness = population[contestant].fitness();

            let ordering = compare_fitness(&contestant_fitness, &winner_fitness)?;
            let is_better = if self.higher_is_better {
                ordering == Ordering::Greater
            } else {
                ordering == Ordering::Less
            };

            if is_better {
                winner = contestant;
                winner_fitness = contestant_fitness;
            }
        }

        Ok(winner)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: 2,
            higher_is_better: true,
        }
    }
}

impl<T, S> SelectionStrategy<T, S> for TournamentSelection
where
    T: Allele,
    S: Fitness,
{
    fn select(
        &self,
        population: &[Chromosome<T, S>],
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Chromosome<T, S>>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut selected = Vec::with_capacity(population.len());
        for _ in 0..population.len() {
            let winner = self.run_tournament(population, rng)?;
            trace!(winner, "Tournament decided");
            selected.push(population[winner].clone());
        }

        Ok(selected)
    }

    fn higher_is_better(&self) -> bool {
        self.higher_is_better
    }
}
