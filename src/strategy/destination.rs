use tracing::debug;

use super::BreedStrategy;
use crate::catalog::FlightCatalog;
use crate::error::Result;
use crate::evolution::options::EvolutionOptions;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::routes::RouteCandidateGenerator;

/// # DestinationSwapStrategy
///
/// All travelers of a trip share one destination, so recombination cannot exchange
/// travelers between parents. Instead adjacent offspring pairs trade their destinations
/// with probability `prob_crossover` (see [`mate`]). Afterwards every offspring is
/// mutated with probability `prob_mutation`: each traveler draws a fresh route to the
/// unchanged destination.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DestinationSwapStrategy;

impl BreedStrategy for DestinationSwapStrategy {
    fn breed<C: FlightCatalog>(
        &self,
        offspring: &mut [Individual],
        generator: &RouteCandidateGenerator<C>,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        for pair in offspring.chunks_exact_mut(2) {
            if rng.chance(evol_options.get_prob_crossover()) {
                let (left, right) = pair.split_at_mut(1);
                mate(&mut left[0], &mut right[0], generator, rng)?;
            }
        }

        for individual in offspring.iter_mut() {
            if rng.chance(evol_options.get_prob_mutation()) {
                individual.mutate(rng);
            }
        }

        Ok(())
    }
}

/// Swaps the destinations of two trips and re-derives every traveler's routes.
///
/// Returns `Ok(false)` and leaves both trips untouched when either of them would end up
/// with a traveler who cannot reach the new destination.
pub fn mate<C: FlightCatalog>(
    first: &mut Individual,
    second: &mut Individual,
    generator: &RouteCandidateGenerator<C>,
    rng: &mut RandomNumberGenerator,
) -> Result<bool> {
    let first_backup = first.clone();
    let second_backup = second.clone();
    let first_destination = first.destination().to_string();
    let second_destination = second.destination().to_string();

    let first_ok = first.relocate(second_destination, generator, rng)?;
    let second_ok = first_ok && second.relocate(first_destination, generator, rng)?;

    if !second_ok {
        debug!(
            first = first_backup.destination(),
            second = second_backup.destination(),
            "Destination swap yields an infeasible trip, keeping both parents"
        );
        *first = first_backup;
        *second = second_backup;
        return Ok(false);
    }
    Ok(true)
}
