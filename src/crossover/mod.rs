//! # Crossover
//!
//! Crossover strategies recombine two chromosomes in place. They never create new
//! chromosome instances: the generation step hands them members of its own mating
//! pool, which it owns exclusively.
pub mod crossover_strategy;
pub mod uniform;

pub use crossover_strategy::CrossoverStrategy;
pub use uniform::UniformCrossover;
