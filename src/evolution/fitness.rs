//! # Trip fitness
//!
//! [`TripFitness`] turns a candidate trip into a single penalty. Every component is
//! divided by a normalizer that grows with the number of travelers, so the balance
//! between objectives stays the same for small and large groups:
//!
//! | component        | raw value                                              | normalizer       |
//! |------------------|--------------------------------------------------------|------------------|
//! | `cost`           | sum of route costs                                     | `1000 * n`       |
//! | `budget`         | sum of `|budget - route cost|`                         | `500 * n`        |
//! | `arrival_spread` | sum of gaps between sorted outbound arrival times (s)  | `86400 * n`      |
//! | `return_spread`  | sum of gaps between sorted return departure times (s)  | `86400 * n`      |
//! | `departures`     | outbound on Sunday, returns on Friday or Saturday      | `2 * n`          |
//! | `stayovers`      | outbound plus return stayovers                         | `2 * n`          |
//! | `trip_length`    | `|return departure - outbound departure - days| (s)`   | `2 * n`          |
//! | `preferred`      | 1 if preferred cities are listed and missed            | 1                |
//!
//! The weighted sum of the components is the penalty; see [`FitnessWeights`] for the
//! multipliers.

use chrono::Weekday;

use crate::evolution::challenge::Challenge;
use crate::individual::Individual;
use crate::plan::TripConstraints;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Multipliers applied to the normalized components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessWeights {
    pub cost: f64,
    pub budget: f64,
    pub arrival_spread: f64,
    pub return_spread: f64,
    pub departures: f64,
    pub stayovers: f64,
    pub trip_length: f64,
    pub preferred: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            cost: 1.0,
            budget: 1.0,
            arrival_spread: 50.0,
            return_spread: 50.0,
            departures: 1.0,
            stayovers: 1.0,
            trip_length: 1.0,
            preferred: 0.0,
        }
    }
}

/// Normalized, unweighted penalty components of one trip.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessBreakdown {
    pub cost: f64,
    pub budget: f64,
    pub arrival_spread: f64,
    pub return_spread: f64,
    pub departures: f64,
    pub stayovers: f64,
    pub trip_length: f64,
    pub preferred: f64,
}

impl FitnessBreakdown {
    pub fn weighted_total(&self, weights: &FitnessWeights) -> f64 {
        self.cost * weights.cost
            + self.budget * weights.budget
            + self.arrival_spread * weights.arrival_spread
            + self.return_spread * weights.return_spread
            + self.departures * weights.departures
            + self.stayovers * weights.stayovers
            + self.trip_length * weights.trip_length
            + self.preferred * weights.preferred
    }
}

/// The penalty used to rank candidate trips.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TripFitness {
    trip_length_seconds: f64,
    preferred: Vec<String>,
    weights: FitnessWeights,
}

impl TripFitness {
    pub fn new(constraints: &TripConstraints) -> Self {
        Self {
            trip_length_seconds: constraints.trip_length_days() as f64 * SECONDS_PER_DAY,
            preferred: constraints.preferred().to_vec(),
            weights: FitnessWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Computes the normalized components, or `None` if some traveler has no route.
    pub fn breakdown(&self, individual: &Individual) -> Option<FitnessBreakdown> {
        let routes = individual
            .travelers()
            .iter()
            .map(|traveler| traveler.selected_route().map(|route| (traveler, route)))
            .collect::<Option<Vec<_>>>()?;
        if routes.is_empty() {
            return None;
        }
        let n = routes.len() as f64;

        let mut total_cost = 0.0;
        let mut delta_budget = 0.0;
        let mut departures = 0u32;
        let mut stayovers = 0u32;
        let mut delta_days = 0.0;
        let mut arrivals = Vec::with_capacity(routes.len());
        let mut returns = Vec::with_capacity(routes.len());

        for (traveler, route) in &routes {
            let outbound = route.outbound();
            let inbound = route.inbound();

            total_cost += route.cost();
            delta_budget += (traveler.budget() - route.cost()).abs();
            if outbound.departure_weekday() == Weekday::Sun {
                departures += 1;
            }
            if matches!(inbound.departure_weekday(), Weekday::Fri | Weekday::Sat) {
                departures += 1;
            }
            stayovers += outbound.stayovers + inbound.stayovers;
            delta_days += (route.trip_length_seconds() as f64 - self.trip_length_seconds).abs();
            arrivals.push(outbound.arrival_timestamp());
            returns.push(inbound.departure_timestamp());
        }

        let preferred = if self.preferred.is_empty()
            || self
                .preferred
                .iter()
                .any(|city| city == individual.destination())
        {
            0.0
        } else {
            1.0
        };

        Some(FitnessBreakdown {
            cost: total_cost / (1000.0 * n),
            budget: delta_budget / (500.0 * n),
            arrival_spread: sorted_gap_sum(&mut arrivals) / (SECONDS_PER_DAY * n),
            return_spread: sorted_gap_sum(&mut returns) / (SECONDS_PER_DAY * n),
            departures: departures as f64 / (2.0 * n),
            stayovers: stayovers as f64 / (2.0 * n),
            trip_length: delta_days / (2.0 * n),
            preferred,
        })
    }
}

impl Challenge for TripFitness {
    /// Weighted penalty; infinite for a trip that is missing routes.
    fn score(&self, individual: &Individual) -> f64 {
        self.breakdown(individual)
            .map_or(f64::INFINITY, |breakdown| {
                breakdown.weighted_total(&self.weights)
            })
    }
}

/// Sum of gaps between neighbours once sorted.
fn sorted_gap_sum(timestamps: &mut [i64]) -> f64 {
    timestamps.sort_unstable();
    timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightOption;
    use crate::plan::{CandidateRoutePair, Traveler};
    use crate::rng::RandomNumberGenerator;
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};

    fn flight(from: &str, to: &str, day: u32, price: f64, stayovers: u32) -> FlightOption {
        let offset = FixedOffset::east_opt(0).unwrap();
        let departure = offset.with_ymd_and_hms(2025, 4, day, 10, 0, 0).unwrap();
        FlightOption {
            from_city: from.to_string(),
            to_city: to.to_string(),
            departure_date: departure.date_naive(),
            departure_time_local: departure,
            arrival_time_local: departure + Duration::hours(2),
            price_eur: price,
            stayovers,
            flight_number: format!("LH{}", day),
            duration_hours: 2.0,
        }
    }

    fn traveler(origin: &str, budget: f64, outbound: FlightOption, inbound: FlightOption) -> Traveler {
        let mut traveler = Traveler::new(origin, budget).unwrap();
        let pair = CandidateRoutePair::new(outbound, vec![inbound]).unwrap();
        traveler.set_candidates(vec![pair].into());
        assert!(traveler.select_route(&mut RandomNumberGenerator::from_seed(0)));
        traveler
    }

    fn constraints(preferred: &[&str]) -> TripConstraints {
        TripConstraints::builder()
            .date_window(
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            )
            .trip_length_days(7)
            .preferred(preferred.iter().copied())
            .destinations(["Munich", "Lisbon"])
            .build()
            .unwrap()
    }

    /// Two travelers: one departs on a Sunday and flies home on a Friday with a stayover,
    /// the other departs Monday for exactly seven days.
    fn individual(destination: &str) -> Individual {
        Individual::from_parts(
            destination,
            vec![
                traveler(
                    "Malaga",
                    200.0,
                    flight("Malaga", destination, 6, 100.0, 1),
                    flight(destination, "Malaga", 11, 50.0, 0),
                ),
                traveler(
                    "Paris",
                    100.0,
                    flight("Paris", destination, 7, 80.0, 0),
                    flight(destination, "Paris", 14, 70.0, 0),
                ),
            ],
        )
    }

    #[test]
    fn test_component_values() {
        let fitness = TripFitness::new(&constraints(&[]));
        let breakdown = fitness.breakdown(&individual("Munich")).unwrap();

        assert!((breakdown.cost - 0.15).abs() < 1e-12);
        assert!((breakdown.budget - 0.1).abs() < 1e-12);
        // arrivals one day apart, returns three days apart
        assert!((breakdown.arrival_spread - 0.5).abs() < 1e-12);
        assert!((breakdown.return_spread - 1.5).abs() < 1e-12);
        assert!((breakdown.departures - 0.5).abs() < 1e-12);
        assert!((breakdown.stayovers - 0.25).abs() < 1e-12);
        // first trip is two days short
        assert!((breakdown.trip_length - 43_200.0).abs() < 1e-9);
        assert_eq!(breakdown.preferred, 0.0);

        let expected = 0.15 + 0.1 + 25.0 + 75.0 + 0.5 + 0.25 + 43_200.0;
        assert!((fitness.score(&individual("Munich")) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_deterministic() {
        let fitness = TripFitness::new(&constraints(&[]));
        let trip = individual("Munich");
        let first = fitness.score(&trip);
        for _ in 0..5 {
            assert_eq!(fitness.score(&trip), first);
        }
    }

    #[test]
    fn test_preferred_destination_is_opt_in() {
        let fitness = TripFitness::new(&constraints(&["Lisbon"]));
        let munich = individual("Munich");
        assert_eq!(fitness.breakdown(&munich).unwrap().preferred, 1.0);
        assert_eq!(
            fitness.breakdown(&individual("Lisbon")).unwrap().preferred,
            0.0
        );

        let default_score = fitness.score(&munich);
        let weighted = fitness.clone().with_weights(FitnessWeights {
            preferred: 2.0,
            ..FitnessWeights::default()
        });
        assert!((weighted.score(&munich) - default_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_route_scores_infinite() {
        let fitness = TripFitness::new(&constraints(&[]));
        let incomplete = Individual::from_parts(
            "Munich",
            vec![Traveler::new("Malaga", 100.0).unwrap()],
        );
        assert!(fitness.breakdown(&incomplete).is_none());
        assert!(fitness.score(&incomplete).is_infinite());
    }

    #[test]
    fn test_single_traveler_has_no_spread() {
        let fitness = TripFitness::new(&constraints(&[]));
        let solo = Individual::from_parts(
            "Munich",
            vec![traveler(
                "Paris",
                150.0,
                flight("Paris", "Munich", 7, 80.0, 0),
                flight("Munich", "Paris", 14, 70.0, 0),
            )],
        );
        let breakdown = fitness.breakdown(&solo).unwrap();
        assert_eq!(breakdown.arrival_spread, 0.0);
        assert_eq!(breakdown.return_spread, 0.0);
        assert_eq!(breakdown.budget, 0.0);
        assert_eq!(breakdown.trip_length, 0.0);
    }
}
