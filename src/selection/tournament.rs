use std::collections::HashSet;

use crate::error::{Result, TripError};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;
use crate::selection::check_population;

/// A selection strategy that picks the lowest penalty out of small random groups.
///
/// Each tournament draws `tournament_size` contestants uniformly with replacement and
/// keeps the best one. Larger tournaments push harder towards the current best trips;
/// a size of 1 is plain random sampling.
///
/// By default the same individual may win several tournaments, which is what a
/// generational loop needs to fill a full offspring pool.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    allow_duplicates: bool,
}

impl TournamentSelection {
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(TripError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            allow_duplicates: true,
        })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Each individual wins at most once; selection stops early once everyone has won.
    pub fn without_duplicates(mut self) -> Self {
        self.allow_duplicates = false;
        self
    }

    /// Runs a single tournament among the non-excluded indices and returns the winner.
    fn run_tournament(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
        excluded: &HashSet<usize>,
    ) -> Result<usize> {
        let eligible: Vec<usize> = (0..fitness.len())
            .filter(|i| !excluded.contains(i))
            .collect();

        if eligible.is_empty() {
            return Err(TripError::Configuration(
                "No eligible individuals for tournament selection".to_string(),
            ));
        }

        let mut winner: Option<usize> = None;
        for _ in 0..self.tournament_size {
            let contestant = match rng.choose(&eligible) {
                Some(&idx) => idx,
                None => continue,
            };
            winner = match winner {
                Some(best) if fitness[best] <= fitness[contestant] || fitness[contestant].is_nan() => {
                    Some(best)
                }
                _ => Some(contestant),
            };
        }

        winner.ok_or_else(|| TripError::Evolution("Tournament produced no winner".to_string()))
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: 5,
            allow_duplicates: true,
        }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        check_population(population, fitness)?;

        let mut selected = Vec::with_capacity(num_to_select);
        let mut selected_indices = HashSet::new();
        let no_exclusions = HashSet::new();

        while selected.len() < num_to_select {
            if self.allow_duplicates {
                let winner = self.run_tournament(fitness, rng, &no_exclusions)?;
                selected.push(population[winner].clone());
            } else {
                if selected_indices.len() >= population.len() {
                    break;
                }
                let winner = self.run_tournament(fitness, rng, &selected_indices)?;
                selected_indices.insert(winner);
                selected.push(population[winner].clone());
            }
        }

        Ok(selected)
    }
}
