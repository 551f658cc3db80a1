//! # Trip plan model
//!
//! The input side of the planner: the travelers (origin and budget each), the
//! [`TripConstraints`] they share, and the candidate and selected routes a traveler
//! carries while the search runs.
//!
//! With the `serde` feature, [`PlanOutcome::from_json`] turns the JSON produced by an
//! upstream request parser into a validated [`TripPlan`].

pub mod constraints;
#[cfg(feature = "serde")]
pub mod request;
pub mod traveler;

pub use constraints::{TripConstraints, TripConstraintsBuilder};
#[cfg(feature = "serde")]
pub use request::PlanOutcome;
pub use traveler::{CandidateRoutePair, SelectedRoute, Traveler};

/// A validated planning request: who travels and under which constraints.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub travelers: Vec<Traveler>,
    pub constraints: TripConstraints,
}
