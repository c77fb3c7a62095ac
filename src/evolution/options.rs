//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the hyperparameters of a run: how many
//! generations to evolve, how large each population is, the crossover and mutation
//! rates, whether elitism is on, how much history to keep and how chatty the
//! logging should be.
//!
//! ## Example
//!
//! ```rust
//! use chromoga::evolution::options::{EvolutionOptions, LogLevel, Retention};
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(50)
//!     .population_size(20)
//!     .crossover_rate(0.7)
//!     .mutation_rate(0.05)
//!     .elitism(true)
//!     .log_level(LogLevel::Minimal)
//!     .retention(Retention::Last(10))
//!     .build();
//!
//! assert!(options.validate().is_ok());
//!
//! // Odd population sizes cannot be split into breeding pairs.
//! let odd = EvolutionOptions::builder().population_size(7).build();
//! assert!(odd.validate().is_err());
//! ```

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// One event per generation plus one per chromosome.
    Verbose,
    /// One event per generation.
    Minimal,
    None,
}

/// How many generations the history keeps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Keep every generation.
    All,
    /// Keep only the most recent `n` generations. `n` must be at least 1.
    Last(usize),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    elitism: bool,
    /// Record the starting population as the first history entry
    include_initial: bool,
    retention: Retention,
    /// Minimum population size for evaluating fitness in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        log_level: LogLevel,
        population_size: usize,
        crossover_rate: f64,
        mutation_rate: f64,
        elitism: bool,
    ) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            crossover_rate,
            mutation_rate,
            elitism,
            ..Self::default()
        }
    }

    /// Checks the options before a run starts.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if:
    /// - The population size is zero or odd
    /// - A rate is not a finite number in `[0, 1]`
    /// - The retention keeps zero generations
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.population_size % 2 != 0 {
            return Err(GeneticError::Configuration(format!(
                "Population size must be even to form breeding pairs, got {}",
                self.population_size
            )));
        }

        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        if self.retention == Retention::Last(0) {
            return Err(GeneticError::Configuration(
                "History retention must keep at least one generation".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_elitism(&self) -> bool {
        self.elitism
    }

    pub fn get_include_initial(&self) -> bool {
        self.include_initial
    }

    pub fn get_retention(&self) -> Retention {
        self.retention
    }

    /// Returns the minimum population size for evaluating fitness in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_elitism(&mut self, elitism: bool) {
        self.elitism = elitism;
    }

    pub fn set_include_initial(&mut self, include_initial: bool) {
        self.include_initial = include_initial;
    }

    pub fn set_retention(&mut self, retention: Retention) {
        self.retention = retention;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            log_level: LogLevel::None,
            population_size: 20,
            crossover_rate: 0.7,
            mutation_rate: 0.01,
            elitism: true,
            include_initial: false,
            retention: Retention::All,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset values fall back to `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    elitism: Option<bool>,
    include_initial: Option<bool>,
    retention: Option<Retention>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn elitism(mut self, value: bool) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn include_initial(mut self, value: bool) -> Self {
        self.include_initial = Some(value);
        self
    }

    pub fn retention(mut self, value: Retention) -> Self {
        self.retention = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    ///
    /// The result is not validated; `EvolutionLauncher` validates it before a run.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            elitism: self.elitism.unwrap_or(defaults.elitism),
            include_initial: self.include_initial.unwrap_or(defaults.include_initial),
            retention: self.retention.unwrap_or(defaults.retention),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}
