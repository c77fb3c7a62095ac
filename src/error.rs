//! # Error Types
//!
//! This module defines the error type shared by every operation of the library.
//! Configuration problems are reported up front, before any generation runs, so
//! a run either completes every generation or fails without partial state.
//!
//! ## Examples
//!
//! ```rust
//! use chromoga::error::{GeneticError, Result};
//!
//! fn check_population_size(size: usize) -> Result<()> {
//!     if size % 2 != 0 {
//!         return Err(GeneticError::Configuration(format!(
//!             "Population size must be even, got {}",
//!             size
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population_size(3).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use chromoga::error::{GeneticError, OptionExt};
//!
//! fn first_candidate(candidates: &[i32]) -> chromoga::error::Result<i32> {
//!     candidates.first().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a genotype does not have the expected number of loci.
    #[error("Genotype length error: expected {expected} loci, found {found}")]
    GenotypeLength { expected: usize, found: usize },

    /// Error that occurs when two fitness values cannot be ordered.
    #[error("Incomparable fitness values: {0}")]
    IncomparableFitness(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
