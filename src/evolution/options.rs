//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run configuration of the trip optimizer:
//! population size, number of generations, crossover and mutation probabilities,
//! tournament size, and the operational knobs for logging, parallelism, candidate
//! caching and the initialization retry budget.
//!
//! ## Example
//!
//! ```rust
//! use grouptrip::evolution::options::{EvolutionOptions, LogLevel};
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(50)
//!     .population_size(40)
//!     .prob_crossover(0.6)
//!     .prob_mutation(0.3)
//!     .log_level(LogLevel::None)
//!     .build()
//!     .unwrap();
//! assert_eq!(options.get_population_size(), 40);
//!
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_tournament_size(), 5);
//! ```
//!
//! ## Enums
//!
//! - `LogLevel`: `Verbose` (per-individual detail), `Minimal` (one line per generation),
//!   `None` (silent).
//! - `CacheType`: how candidate routes are memoized: `None`, `Global`, `ThreadLocal`.

use crate::error::{Result, TripError};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    /// Candidates are recomputed on every lookup.
    None,
    /// One cache shared by all threads.
    Global,
    /// One cache per thread.
    ThreadLocal,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    prob_crossover: f64,
    prob_mutation: f64,
    tournament_size: usize,
    log_level: LogLevel,
    /// Minimum number of items to process in parallel
    parallel_threshold: usize,
    cache_type: CacheType,
    /// Draws allowed while filling the initial population
    max_init_attempts: usize,
}

impl EvolutionOptions {
    /// Creates options with the given core parameters and default operational settings.
    ///
    /// No validation happens here; use [`EvolutionOptions::builder`] or
    /// [`EvolutionOptions::validate`] for checked construction.
    pub fn new(
        num_generations: usize,
        population_size: usize,
        prob_crossover: f64,
        prob_mutation: f64,
    ) -> Self {
        Self {
            num_generations,
            population_size,
            prob_crossover,
            prob_mutation,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_prob_crossover(&self) -> f64 {
        self.prob_crossover
    }

    pub fn get_prob_mutation(&self) -> f64 {
        self.prob_mutation
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum number of items to process in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_cache_type(&self) -> CacheType {
        self.cache_type
    }

    pub fn get_max_init_attempts(&self) -> usize {
        self.max_init_attempts
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_prob_crossover(&mut self, probability: f64) {
        self.prob_crossover = probability;
    }

    pub fn set_prob_mutation(&mut self, probability: f64) {
        self.prob_mutation = probability;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_cache_type(&mut self, cache_type: CacheType) {
        self.cache_type = cache_type;
    }

    pub fn set_max_init_attempts(&mut self, attempts: usize) {
        self.max_init_attempts = attempts;
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TripError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TripError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        for (name, probability) in [
            ("Crossover", self.prob_crossover),
            ("Mutation", self.prob_mutation),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(TripError::Configuration(format!(
                    "{} probability must be within [0, 1], got {}",
                    name, probability
                )));
            }
        }
        if self.max_init_attempts < self.population_size {
            return Err(TripError::Configuration(format!(
                "Initialization budget ({}) is smaller than the population size ({})",
                self.max_init_attempts, self.population_size
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating a validated `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 40,
            population_size: 30,
            prob_crossover: 0.5,
            prob_mutation: 0.2,
            tournament_size: 5,
            log_level: LogLevel::Minimal,
            parallel_threshold: 1000,
            cache_type: CacheType::Global,
            max_init_attempts: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to the defaults; `build` validates the result.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    prob_crossover: Option<f64>,
    prob_mutation: Option<f64>,
    tournament_size: Option<usize>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
    cache_type: Option<CacheType>,
    max_init_attempts: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn prob_crossover(mut self, value: f64) -> Self {
        self.prob_crossover = Some(value);
        self
    }

    pub fn prob_mutation(mut self, value: f64) -> Self {
        self.prob_mutation = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn cache_type(mut self, value: CacheType) -> Self {
        self.cache_type = Some(value);
        self
    }

    pub fn max_init_attempts(mut self, value: usize) -> Self {
        self.max_init_attempts = Some(value);
        self
    }

    pub fn build(self) -> Result<EvolutionOptions> {
        let default = EvolutionOptions::default();
        let options = EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            population_size: self.population_size.unwrap_or(default.population_size),
            prob_crossover: self.prob_crossover.unwrap_or(default.prob_crossover),
            prob_mutation: self.prob_mutation.unwrap_or(default.prob_mutation),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            log_level: self.log_level.unwrap_or(default.log_level),
            parallel_threshold: self.parallel_threshold.unwrap_or(default.parallel_threshold),
            cache_type: self.cache_type.unwrap_or(default.cache_type),
            max_init_attempts: self.max_init_attempts.unwrap_or(default.max_init_attempts),
        };
        options.validate()?;
        Ok(options)
    }
}
