use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TripError};
use crate::flight::FlightOption;
use crate::rng::RandomNumberGenerator;

/// One outbound flight together with every return flight that fits it.
///
/// A pair always holds at least one return flight.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoutePair {
    outbound: Arc<FlightOption>,
    returns: Vec<Arc<FlightOption>>,
}

impl CandidateRoutePair {
    /// Returns `None` when `returns` is empty.
    pub fn new(outbound: FlightOption, returns: Vec<FlightOption>) -> Option<Self> {
        if returns.is_empty() {
            return None;
        }
        Some(Self {
            outbound: Arc::new(outbound),
            returns: returns.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn outbound(&self) -> &FlightOption {
        &self.outbound
    }

    pub fn returns(&self) -> &[Arc<FlightOption>] {
        &self.returns
    }

    /// Uniformly picks one return flight and pairs it with the outbound leg.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> Option<SelectedRoute> {
        rng.choose(&self.returns)
            .map(|inbound| SelectedRoute::new(Arc::clone(&self.outbound), Arc::clone(inbound)))
    }
}

/// The round trip currently assigned to a traveler.
///
/// `cost` is derived from both legs and recomputed whenever a leg changes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedRoute {
    outbound: Arc<FlightOption>,
    inbound: Arc<FlightOption>,
    cost: f64,
}

impl SelectedRoute {
    pub fn new(outbound: Arc<FlightOption>, inbound: Arc<FlightOption>) -> Self {
        let cost = outbound.price_eur + inbound.price_eur;
        Self {
            outbound,
            inbound,
            cost,
        }
    }

    pub fn outbound(&self) -> &FlightOption {
        &self.outbound
    }

    /// The flight back to the traveler's origin.
    pub fn inbound(&self) -> &FlightOption {
        &self.inbound
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn set_outbound(&mut self, outbound: Arc<FlightOption>) {
        self.outbound = outbound;
        self.recompute_cost();
    }

    pub fn set_inbound(&mut self, inbound: Arc<FlightOption>) {
        self.inbound = inbound;
        self.recompute_cost();
    }

    fn recompute_cost(&mut self) {
        self.cost = self.outbound.price_eur + self.inbound.price_eur;
    }

    /// Seconds between outbound departure and return departure.
    pub fn trip_length_seconds(&self) -> i64 {
        self.inbound.departure_timestamp() - self.outbound.departure_timestamp()
    }
}

/// A member of the travelling group.
///
/// The candidate routes belong to the destination currently chosen for the group and are
/// replaced whenever it changes. Candidate sets are immutable and shared between copies;
/// the selected route is owned by each copy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Traveler {
    origin: String,
    budget: f64,
    candidates: Arc<[CandidateRoutePair]>,
    selected: Option<SelectedRoute>,
}

impl Traveler {
    pub fn new(origin: impl Into<String>, budget: f64) -> Result<Self> {
        let origin = origin.into();
        if origin.trim().is_empty() {
            return Err(TripError::InvalidPlan(
                "Traveler origin must not be empty".to_string(),
            ));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(TripError::InvalidPlan(format!(
                "Budget of traveler from {} must be a non-negative number, got {}",
                origin, budget
            )));
        }
        Ok(Self {
            origin,
            budget,
            candidates: Vec::new().into(),
            selected: None,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn candidates(&self) -> &[CandidateRoutePair] {
        &self.candidates
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn selected_route(&self) -> Option<&SelectedRoute> {
        self.selected.as_ref()
    }

    /// Installs the candidates for a new destination and drops the current selection.
    pub fn set_candidates(&mut self, candidates: Arc<[CandidateRoutePair]>) {
        self.candidates = candidates;
        self.selected = None;
    }

    /// Uniformly picks a candidate pair, then uniformly picks one of its returns.
    ///
    /// The current selection plays no part in the draw. Returns `false` and leaves the
    /// traveler without a route when there are no candidates.
    pub fn select_route(&mut self, rng: &mut RandomNumberGenerator) -> bool {
        self.selected = rng
            .choose(&self.candidates)
            .and_then(|pair| pair.sample(rng));
        self.selected.is_some()
    }
}

impl fmt::Display for Traveler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Origin: {}", self.origin)?;
        writeln!(f, "  Budget: €{:.2}", self.budget)?;
        match &self.selected {
            Some(route) => {
                writeln!(f, "  Outbound Flight:")?;
                writeln!(f, "    {}", route.outbound())?;
                writeln!(f, "  Return Flight:")?;
                writeln!(f, "    {}", route.inbound())?;
                write!(f, "  Total Route Cost: €{:.2}", route.cost())
            }
            None => write!(f, "  No route selected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn flight(from: &str, to: &str, day: u32, price: f64) -> FlightOption {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let departure = offset.with_ymd_and_hms(2025, 10, day, 10, 0, 0).unwrap();
        FlightOption {
            from_city: from.to_string(),
            to_city: to.to_string(),
            departure_date: departure.date_naive(),
            departure_time_local: departure,
            arrival_time_local: departure + chrono::Duration::hours(3),
            price_eur: price,
            stayovers: 0,
            flight_number: format!("KL{}", day),
            duration_hours: 3.0,
        }
    }

    #[test]
    fn test_pair_requires_returns() {
        assert!(CandidateRoutePair::new(flight("Malaga", "Munich", 1, 50.0), vec![]).is_none());
        let pair = CandidateRoutePair::new(
            flight("Malaga", "Munich", 1, 50.0),
            vec![flight("Munich", "Malaga", 8, 70.0)],
        )
        .unwrap();
        assert_eq!(pair.returns().len(), 1);
    }

    #[test]
    fn test_cost_follows_legs() {
        let mut route = SelectedRoute::new(
            Arc::new(flight("Malaga", "Munich", 1, 50.0)),
            Arc::new(flight("Munich", "Malaga", 8, 70.0)),
        );
        assert_eq!(route.cost(), 120.0);

        route.set_inbound(Arc::new(flight("Munich", "Malaga", 9, 30.0)));
        assert_eq!(route.cost(), 80.0);

        route.set_outbound(Arc::new(flight("Malaga", "Munich", 2, 15.5)));
        assert_eq!(route.cost(), 45.5);
        assert_eq!(route.trip_length_seconds(), 7 * 86_400);
    }

    #[test]
    fn test_traveler_validation() {
        assert!(Traveler::new("Malaga", 300.0).is_ok());
        assert!(matches!(Traveler::new("", 300.0), Err(TripError::InvalidPlan(_))));
        assert!(matches!(Traveler::new("Malaga", -1.0), Err(TripError::InvalidPlan(_))));
        assert!(matches!(Traveler::new("Malaga", f64::NAN), Err(TripError::InvalidPlan(_))));
    }

    #[test]
    fn test_select_route_without_candidates() {
        let mut traveler = Traveler::new("Malaga", 300.0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(4);
        assert!(!traveler.select_route(&mut rng));
        assert!(traveler.selected_route().is_none());
    }

    #[test]
    fn test_select_route_draws_from_candidates() {
        let pairs: Vec<CandidateRoutePair> = (1..=3)
            .filter_map(|day| {
                CandidateRoutePair::new(
                    flight("Malaga", "Munich", day, 10.0 * day as f64),
                    vec![
                        flight("Munich", "Malaga", day + 5, 40.0),
                        flight("Munich", "Malaga", day + 6, 60.0),
                    ],
                )
            })
            .collect();
        let mut traveler = Traveler::new("Malaga", 300.0).unwrap();
        traveler.set_candidates(pairs.into());

        let mut rng = RandomNumberGenerator::from_seed(8);
        for _ in 0..20 {
            assert!(traveler.select_route(&mut rng));
            let route = traveler.selected_route().unwrap();
            assert_eq!(route.cost(), route.outbound().price_eur + route.inbound().price_eur);
            assert!(traveler
                .candidates()
                .iter()
                .any(|pair| pair.outbound() == route.outbound()
                    && pair.returns().iter().any(|r| r.as_ref() == route.inbound())));
        }
    }

    #[test]
    fn test_set_candidates_clears_selection() {
        let pair = CandidateRoutePair::new(
            flight("Malaga", "Munich", 1, 50.0),
            vec![flight("Munich", "Malaga", 8, 70.0)],
        )
        .unwrap();
        let mut traveler = Traveler::new("Malaga", 300.0).unwrap();
        traveler.set_candidates(vec![pair].into());
        let mut rng = RandomNumberGenerator::from_seed(2);
        assert!(traveler.select_route(&mut rng));

        traveler.set_candidates(Vec::new().into());
        assert!(traveler.selected_route().is_none());
        assert!(!traveler.has_candidates());
    }
}
