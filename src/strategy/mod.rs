//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines how a pool of selected offspring is recombined and
//! mutated in place before it becomes the next generation.
pub mod destination;

use std::fmt::Debug;

use crate::{
    catalog::FlightCatalog, error::Result, evolution::options::EvolutionOptions,
    individual::Individual, rng::RandomNumberGenerator, routes::RouteCandidateGenerator,
};

/// # BreedStrategy
///
/// Implementations modify `offspring` in place. Every individual they change must come
/// out either feasible with its fitness invalidated, or exactly as it went in.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// ## Parameters
    ///
    /// - `offspring`: The selected individuals, already independent clones.
    /// - `generator`: Source of candidate routes for any destination change.
    /// - `evol_options`: Crossover and mutation probabilities.
    /// - `rng`: The random number generator driving every draw.
    ///
    /// ## Errors
    ///
    /// Fails only if the flight catalog fails while re-deriving candidates.
    fn breed<C: FlightCatalog>(
        &self,
        offspring: &mut [Individual],
        generator: &RouteCandidateGenerator<C>,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;
}

pub use destination::{mate, DestinationSwapStrategy};
