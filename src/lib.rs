pub mod chromosome;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod mutation;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::{Blueprint, Chromosome, ChromosomeRows, Converter, Converters};
pub use error::{GeneticError, OptionExt, Result};
pub use population::Population;
