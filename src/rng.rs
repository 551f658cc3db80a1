//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seedable `StdRng` and provides the
//! sampling primitives the planner needs.
//!
//! ## Example
//!
//! ```rust
//! use grouptrip::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let cities = ["Munich", "Lisbon", "Prague"];
//! let city = rng.choose(&cities).unwrap();
//! assert!(cities.contains(city));
//!
//! let price = rng.uniform(10.0, 300.0);
//! assert!((10.0..300.0).contains(&price));
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Debug, Clone)]
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

    /// Returns a uniformly drawn `f64` in `[from, to)`.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        self.rng.gen_range(from..to)
    }

    /// Returns a uniformly drawn index in `0..len`, or `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }

    /// Returns a uniformly drawn element of `items`, or `None` when it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Returns `true` with probability `probability`.
    ///
    /// Values outside `[0, 1]` are clamped.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            false
        } else if probability >= 1.0 {
            true
        } else {
            self.rng.gen_bool(probability)
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let value = rng.uniform(1.0, 5.0);
            assert!((1.0..5.0).contains(&value));
        }
    }

    #[test]
    fn test_index_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert_eq!(rng.index(0), None);
        for _ in 0..100 {
            assert!(rng.index(3).unwrap() < 3);
        }
        assert_eq!(rng.index(1), Some(0));
    }

    #[test]
    fn test_choose_from_empty_slice() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        for _ in 0..50 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-2.0));
            assert!(rng.chance(4.0));
        }
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let draws1: Vec<usize> = (0..5).filter_map(|_| rng1.index(1000)).collect();
        let draws2: Vec<usize> = (0..5).filter_map(|_| rng2.index(1000)).collect();

        assert_eq!(draws1, draws2);
    }
}
