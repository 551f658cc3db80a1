pub mod elitist;
pub mod selection_strategy;
pub mod tournament;

pub use elitist::{best_index, worst_index, ElitistSelection};
pub use selection_strategy::SelectionStrategy;
pub use tournament::TournamentSelection;

use crate::error::{Result, TripError};
use crate::individual::Individual;

/// Shared precondition of every strategy: a non-empty population with one score each.
pub(crate) fn check_population(population: &[Individual], fitness: &[f64]) -> Result<()> {
    if population.is_empty() {
        return Err(TripError::EmptyPopulation);
    }

    if fitness.len() != population.len() {
        return Err(TripError::Configuration(format!(
            "Fitness vector length ({}) doesn't match population length ({})",
            fitness.len(),
            population.len()
        )));
    }
    Ok(())
}
