use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for choosing individuals from a scored population.
///
/// Penalties are minimized: a lower fitness value is a better trip. Selected individuals
/// are returned as independent clones, so the caller can modify them freely.
///
/// # Examples
///
/// ```
/// use grouptrip::individual::Individual;
/// use grouptrip::plan::Traveler;
/// use grouptrip::rng::RandomNumberGenerator;
/// use grouptrip::selection::{ElitistSelection, SelectionStrategy};
///
/// let population: Vec<Individual> = ["Munich", "Lisbon", "Paris"]
///     .iter()
///     .map(|city| Individual::from_parts(*city, vec![Traveler::new("Malaga", 100.0).unwrap()]))
///     .collect();
/// let fitness = vec![0.5, 0.2, 0.9];
/// let mut rng = RandomNumberGenerator::from_seed(7);
///
/// let selected = ElitistSelection::default()
///     .select(&population, &fitness, 1, &mut rng)
///     .unwrap();
/// assert_eq!(selected[0].destination(), "Lisbon");
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` individuals.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}
