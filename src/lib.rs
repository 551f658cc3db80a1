//! # grouptrip
//!
//! Plans one trip for a group of travelers who start from different cities. Every
//! traveler must reach the same destination; an evolutionary search picks the
//! destination and each traveler's outbound and return flights, trading off price,
//! budgets, how closely the group arrives and leaves together, weekend waste, stayovers
//! and trip length.
//!
//! The usual entry point is [`EvolutionLauncher`]: give it a [`catalog::FlightCatalog`],
//! the traveler roster and the [`plan::TripConstraints`], then either drain
//! [`EvolutionLauncher::run`] or iterate [`EvolutionLauncher::evolve`] for per-generation
//! progress.

pub mod caching;
pub mod catalog;
pub mod error;
pub mod evolution;
pub mod flight;
pub mod individual;
pub mod plan;
pub mod rng;
pub mod routes;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, ResultExt, TripError};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, ProgressUpdate};
pub use individual::Individual;
pub use selection::SelectionStrategy;
pub use strategy::BreedStrategy;
