use std::cmp::Ordering;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::check_population;
use crate::selection::selection_strategy::SelectionStrategy;

/// Deterministically selects the lowest-penalty individuals, best first.
///
/// NaN penalties rank after every number. The engine uses this strategy to carry the
/// best trip of a generation over into the next one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection {
    /// Whether to cycle through the ranking again when more individuals are requested
    /// than the population holds.
    allow_duplicates: bool,
}

impl ElitistSelection {
    pub fn new(allow_duplicates: bool) -> Self {
        Self { allow_duplicates }
    }

    pub fn with_duplicates(mut self) -> Self {
        self.allow_duplicates = true;
        self
    }
}

/// Orders penalties ascending with NaN last.
fn compare_penalties(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    })
}

/// Index of the lowest penalty. Ties go to the earliest index.
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .min_by(|a, b| compare_penalties(*a.1, *b.1).then(a.0.cmp(&b.0)))
        .map(|(idx, _)| idx)
}

/// Index of the highest penalty, NaN counting as the worst. Ties go to the earliest index.
pub fn worst_index(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .max_by(|a, b| compare_penalties(*a.1, *b.1).then(b.0.cmp(&a.0)))
        .map(|(idx, _)| idx)
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        check_population(population, fitness)?;

        let mut ranking: Vec<usize> = (0..population.len()).collect();
        ranking.sort_by(|&a, &b| compare_penalties(fitness[a], fitness[b]));

        let take = if self.allow_duplicates {
            num_to_select
        } else {
            num_to_select.min(ranking.len())
        };

        Ok(ranking
            .iter()
            .cycle()
            .take(take)
            .map(|&idx| population[idx].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Traveler;

    fn population(cities: &[&str]) -> Vec<Individual> {
        cities
            .iter()
            .map(|city| {
                Individual::from_parts(*city, vec![Traveler::new("Malaga", 100.0).unwrap()])
            })
            .collect()
    }

    fn destinations(selected: &[Individual]) -> Vec<&str> {
        selected.iter().map(|ind| ind.destination()).collect()
    }

    #[test]
    fn test_elitist_selection() {
        let population = population(&["A", "B", "C", "D", "E"]);
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = ElitistSelection::default()
            .select(&population, &fitness, 3, &mut rng)
            .unwrap();
        assert_eq!(destinations(&selected), vec!["E", "C", "A"]);
    }

    #[test]
    fn test_elitist_selection_with_duplicates() {
        let population = population(&["A", "B", "C"]);
        let fitness = vec![0.5, 0.8, 0.3];
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = ElitistSelection::new(true)
            .select(&population, &fitness, 5, &mut rng)
            .unwrap();
        assert_eq!(destinations(&selected), vec!["C", "A", "B", "C", "A"]);

        let capped = ElitistSelection::default()
            .select(&population, &fitness, 5, &mut rng)
            .unwrap();
        assert_eq!(capped.len(), 3);
    }

    #[test]
    fn test_elitist_selection_with_nan() {
        let population = population(&["A", "B", "C"]);
        let fitness = vec![0.5, f64::NAN, 0.3];
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = ElitistSelection::default()
            .select(&population, &fitness, 3, &mut rng)
            .unwrap();
        assert_eq!(destinations(&selected), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_best_and_worst_index() {
        assert_eq!(best_index(&[0.4, 0.1, 0.1, 0.9]), Some(1));
        assert_eq!(worst_index(&[0.4, 0.9, 0.1, 0.9]), Some(1));
        assert_eq!(worst_index(&[0.4, f64::NAN, 7.0]), Some(1));
        assert_eq!(best_index(&[f64::NAN, 3.0]), Some(1));
        assert_eq!(best_index(&[]), None);
        assert_eq!(worst_index(&[]), None);
    }

    #[test]
    fn test_elitist_selection_errors() {
        let mut rng = RandomNumberGenerator::from_seed(0);
        let empty: Vec<Individual> = Vec::new();
        assert!(ElitistSelection::default()
            .select(&empty, &[], 1, &mut rng)
            .is_err());

        let population = population(&["A", "B"]);
        assert!(ElitistSelection::default()
            .select(&population, &[0.1], 1, &mut rng)
            .is_err());
    }
}
