//! # Random Sources
//!
//! Every randomized operation of the library draws from a `RandomSource` passed in
//! by the caller. There is no process-wide generator: a run is reproducible as soon
//! as the caller seeds the source.
//!
//! ## Example
//!
//! ```rust
//! use chromoga::rng::{RandomNumberGenerator, RandomSource};
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let locus = rng.index(10);
//! let roll = rng.unit();
//!
//! assert!(locus < 10);
//! assert!((0.0..1.0).contains(&roll));
//! ```
//!
//! ## Scripted draws
//!
//! `ScriptedRng` replays fixed sequences of draws, which makes it possible to force
//! a particular tournament, locus or swap decision:
//!
//! ```rust
//! use chromoga::rng::{RandomSource, ScriptedRng};
//!
//! let mut rng = ScriptedRng::new().with_indices(vec![2]).with_coins(vec![true, false]);
//! assert_eq!(rng.index(5), 2);
//! assert!(rng.coin());
//! assert!(!rng.coin());
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A source of uniform random draws.
///
/// The trait is object safe so that allele initializers and mutation producers can
/// be stored as `dyn Fn(&mut dyn RandomSource) -> T`.
pub trait RandomSource {
    /// Returns an index drawn uniformly from `[0, upper)`.
    ///
    /// `upper` must be greater than zero.
    fn index(&mut self, upper: usize) -> usize;

    /// Returns a float drawn uniformly from `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a fair random boolean.
    fn coin(&mut self) -> bool {
        self.unit() < 0.5
    }

    /// Returns a float drawn uniformly from `[from, to)`.
    fn range(&mut self, from: f64, to: f64) -> f64 {
        from + (to - from) * self.unit()
    }
}

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RandomNumberGenerator {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn coin(&mut self) -> bool {
        self.rng.gen::<bool>()
    }
}

/// A random source that replays fixed scripts of draws.
///
/// Each kind of draw has its own script, consumed cyclically. Indices are reduced
/// modulo the requested bound so they always stay in range. An empty script yields
/// `0`, `0.0` and `false` respectively.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    indices: Vec<usize>,
    units: Vec<f64>,
    coins: Vec<bool>,
    next_index: usize,
    next_unit: usize,
    next_coin: usize,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the script replayed by `index`.
    pub fn with_indices(mut self, indices: Vec<usize>) -> Self {
        self.indices = indices;
        self.next_index = 0;
        self
    }

    /// Sets the script replayed by `unit`. Values are clamped into `[0, 1)`.
    pub fn with_units(mut self, units: Vec<f64>) -> Self {
        self.units = units
            .into_iter()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        self.next_unit = 0;
        self
    }

    /// Sets the script replayed by `coin`.
    pub fn with_coins(mut self, coins: Vec<bool>) -> Self {
        self.coins = coins;
        self.next_coin = 0;
        self
    }
}

fn cycle<T: Copy>(script: &[T], cursor: &mut usize) -> Option<T> {
    if script.is_empty() {
        return None;
    }
    let value = script[*cursor % script.len()];
    *cursor += 1;
    Some(value)
}

impl RandomSource for ScriptedRng {
    fn index(&mut self, upper: usize) -> usize {
        cycle(&self.indices, &mut self.next_index).unwrap_or(0) % upper.max(1)
    }

    fn unit(&mut self) -> f64 {
        cycle(&self.units, &mut self.next_unit).unwrap_or(0.0)
    }

    fn coin(&mut self) -> bool {
        cycle(&self.coins, &mut self.next_coin).unwrap_or(false)
    }
}
