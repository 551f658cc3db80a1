//! # Individual
//!
//! An [`Individual`] is one complete candidate trip: a destination shared by the whole
//! group plus, for every traveler, the candidate routes to that destination and the round
//! trip currently picked from them. Its fitness is `None` until evaluated and is reset
//! by every operator that changes the trip.
//!
//! Individuals are plain values. Cloning one yields an independent copy whose routes and
//! destination can change without affecting the original; only the immutable candidate
//! sets are shared.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grouptrip::catalog::SyntheticCatalog;
//! use grouptrip::individual::Individual;
//! use grouptrip::plan::{TripConstraints, Traveler};
//! use grouptrip::rng::RandomNumberGenerator;
//! use grouptrip::routes::RouteCandidateGenerator;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let catalog = SyntheticCatalog::builder()
//!     .cities([("Malaga", 1), ("Munich", 1)])
//!     .start_date(start)
//!     .horizon_days(30)
//!     .num_flights(400)
//!     .seed(3)
//!     .build()
//!     .unwrap();
//! let constraints = TripConstraints::builder()
//!     .date_window(start, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap())
//!     .destinations(["Munich"])
//!     .build()
//!     .unwrap();
//! let generator = RouteCandidateGenerator::new(catalog, constraints);
//! let roster = vec![Traveler::new("Malaga", 400.0).unwrap()];
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! if let Some(individual) = Individual::create(&roster, &generator, &mut rng).unwrap() {
//!     assert_eq!(individual.destination(), "Munich");
//!     assert!(individual.fitness().is_none());
//! }
//! ```

use std::fmt;

use crate::catalog::FlightCatalog;
use crate::error::Result;
use crate::plan::Traveler;
use crate::rng::RandomNumberGenerator;
use crate::routes::RouteCandidateGenerator;

/// One candidate trip for the whole group.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    destination: String,
    travelers: Vec<Traveler>,
    fitness: Option<f64>,
}

impl Individual {
    /// Samples a destination and a route per traveler.
    ///
    /// `roster` is copied, never modified. Returns `Ok(None)` when some traveler has no
    /// candidate route to the sampled destination; such a draw must be discarded.
    pub fn create<C: FlightCatalog>(
        roster: &[Traveler],
        generator: &RouteCandidateGenerator<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Option<Self>> {
        let destination = match rng.choose(generator.constraints().destinations()) {
            Some(destination) => destination.clone(),
            None => return Ok(None),
        };

        let mut individual = Self {
            destination: destination.clone(),
            travelers: roster.to_vec(),
            fitness: None,
        };

        if individual.relocate(destination, generator, rng)? {
            Ok(Some(individual))
        } else {
            Ok(None)
        }
    }

    /// Assembles an individual from parts, e.g. a stored plan. Fitness starts unknown.
    pub fn from_parts(destination: impl Into<String>, travelers: Vec<Traveler>) -> Self {
        Self {
            destination: destination.into(),
            travelers,
            fitness: None,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn travelers(&self) -> &[Traveler] {
        &self.travelers
    }

    /// Penalty from the last evaluation, `None` if the trip changed since.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Every traveler has candidates to the destination and a selected route.
    pub fn is_feasible(&self) -> bool {
        !self.travelers.is_empty()
            && self
                .travelers
                .iter()
                .all(|t| t.has_candidates() && t.selected_route().is_some())
    }

    /// Moves the whole group to `destination`: re-derives every traveler's candidates
    /// and draws fresh routes.
    ///
    /// Returns `Ok(false)` when a traveler has no candidate to the new destination. The
    /// individual is then infeasible and must not be scored.
    pub fn relocate<C: FlightCatalog>(
        &mut self,
        destination: String,
        generator: &RouteCandidateGenerator<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<bool> {
        let origins: Vec<&str> = self.travelers.iter().map(Traveler::origin).collect();
        let candidates = generator.candidates_for_all(&origins, &destination)?;

        for (traveler, candidates) in self.travelers.iter_mut().zip(candidates) {
            traveler.set_candidates(candidates);
        }
        self.destination = destination;
        self.fitness = None;

        if self.travelers.iter().any(|t| !t.has_candidates()) {
            return Ok(false);
        }
        self.select_routes(rng);
        Ok(true)
    }

    /// Draws a route for every traveler that has candidates, ignoring current choices.
    pub fn select_routes(&mut self, rng: &mut RandomNumberGenerator) {
        for traveler in self.travelers.iter_mut().filter(|t| t.has_candidates()) {
            traveler.select_route(rng);
        }
        self.fitness = None;
    }

    /// Re-draws every traveler's route while keeping the destination.
    pub fn mutate(&mut self, rng: &mut RandomNumberGenerator) {
        self.select_routes(rng);
    }

    /// Sum of all selected route costs.
    pub fn total_cost(&self) -> f64 {
        self.travelers
            .iter()
            .filter_map(Traveler::selected_route)
            .map(|route| route.cost())
            .sum()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chosen destination: {}", self.destination)?;
        if let Some(fitness) = self.fitness {
            writeln!(f, "Penalty: {:.4}", fitness)?;
        }
        for (i, traveler) in self.travelers.iter().enumerate() {
            writeln!(f, "Traveller {}:", i + 1)?;
            writeln!(f, "{}", traveler)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::flight::FlightOption;
    use crate::plan::TripConstraints;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn flight(from: &str, to: &str, day: u32, price: f64) -> FlightOption {
        let offset = FixedOffset::east_opt(0).unwrap();
        let departure = offset.with_ymd_and_hms(2025, 4, day, 11, 0, 0).unwrap();
        FlightOption {
            from_city: from.to_string(),
            to_city: to.to_string(),
            departure_date: departure.date_naive(),
            departure_time_local: departure,
            arrival_time_local: departure + chrono::Duration::hours(2),
            price_eur: price,
            stayovers: 0,
            flight_number: format!("BA{}{}", day, price as u32),
            duration_hours: 2.0,
        }
    }

    /// Malaga and Paris reach Munich; only Malaga reaches Lisbon.
    fn generator(destinations: &[&str]) -> RouteCandidateGenerator<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new(vec![
            flight("Malaga", "Munich", 2, 50.0),
            flight("Malaga", "Munich", 3, 70.0),
            flight("Munich", "Malaga", 6, 40.0),
            flight("Munich", "Malaga", 7, 60.0),
            flight("Paris", "Munich", 2, 30.0),
            flight("Munich", "Paris", 6, 35.0),
            flight("Malaga", "Lisbon", 2, 20.0),
            flight("Lisbon", "Malaga", 6, 25.0),
        ]);
        let constraints = TripConstraints::builder()
            .date_window(
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            )
            .trip_length_days(7)
            .destinations(destinations.iter().copied())
            .build()
            .unwrap();
        RouteCandidateGenerator::new(catalog, constraints)
    }

    fn roster() -> Vec<Traveler> {
        vec![
            Traveler::new("Malaga", 150.0).unwrap(),
            Traveler::new("Paris", 100.0).unwrap(),
        ]
    }

    #[test]
    fn test_create_feasible() {
        let generator = generator(&["Munich"]);
        let mut rng = RandomNumberGenerator::from_seed(1);
        let roster = roster();

        let individual = Individual::create(&roster, &generator, &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(individual.destination(), "Munich");
        assert!(individual.is_feasible());
        assert!(individual.fitness().is_none());
        for traveler in individual.travelers() {
            let route = traveler.selected_route().unwrap();
            assert_eq!(route.outbound().to_city, "Munich");
            assert_eq!(route.inbound().to_city, traveler.origin());
        }
        // the template is untouched
        assert!(roster.iter().all(|t| !t.has_candidates()));
    }

    #[test]
    fn test_create_infeasible_destination() {
        let generator = generator(&["Lisbon"]);
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(Individual::create(&roster(), &generator, &mut rng)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_clones_are_independent() {
        let generator = generator(&["Munich"]);
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut original = Individual::create(&roster(), &generator, &mut rng)
            .unwrap()
            .unwrap();
        original.set_fitness(1.0);
        let snapshot = original.clone();

        let mut copy = original.clone();
        for _ in 0..10 {
            copy.mutate(&mut rng);
        }
        assert!(copy.fitness().is_none());
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_relocate_to_unreachable_destination() {
        let generator = generator(&["Munich", "Lisbon"]);
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut individual = Individual::from_parts("Munich", roster());
        assert!(individual
            .relocate("Munich".to_string(), &generator, &mut rng)
            .unwrap());
        assert!(individual.is_feasible());

        assert!(!individual
            .relocate("Lisbon".to_string(), &generator, &mut rng)
            .unwrap());
        assert!(!individual.is_feasible());
    }

    #[test]
    fn test_total_cost_and_display() {
        let generator = generator(&["Munich"]);
        let mut rng = RandomNumberGenerator::from_seed(9);
        let individual = Individual::create(&roster(), &generator, &mut rng)
            .unwrap()
            .unwrap();
        let expected: f64 = individual
            .travelers()
            .iter()
            .map(|t| t.selected_route().unwrap().cost())
            .sum();
        assert_eq!(individual.total_cost(), expected);

        let text = individual.to_string();
        assert!(text.contains("Chosen destination: Munich"));
        assert!(text.contains("Traveller 2:"));
    }
}
