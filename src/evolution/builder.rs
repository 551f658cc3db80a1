use crate::{
    catalog::FlightCatalog,
    error::{Result, TripError},
    evolution::options::EvolutionOptions,
    plan::{TripConstraints, Traveler},
    selection::SelectionStrategy,
    strategy::BreedStrategy,
};

use super::{fitness::TripFitness, Challenge, EvolutionLauncher};
use crate::selection::TournamentSelection;
use crate::strategy::DestinationSwapStrategy;

/// Assembles an [`EvolutionLauncher`] with custom collaborators.
///
/// The catalog, constraints, challenge, selection and breed strategies are required;
/// `build` reports the first one missing. The roster may be given in one go or traveler
/// by traveler. Options default to [`EvolutionOptions::default`].
#[derive(Debug)]
pub struct EvolutionLauncherBuilder<
    C,
    F = TripFitness,
    S = TournamentSelection,
    B = DestinationSwapStrategy,
> {
    catalog: Option<C>,
    roster: Vec<Traveler>,
    constraints: Option<TripConstraints>,
    options: EvolutionOptions,
    challenge: Option<F>,
    selection_strategy: Option<S>,
    breed_strategy: Option<B>,
}

impl<C, F, S, B> EvolutionLauncherBuilder<C, F, S, B> {
    pub fn new() -> Self {
        Self {
            catalog: None,
            roster: Vec::new(),
            constraints: None,
            options: EvolutionOptions::default(),
            challenge: None,
            selection_strategy: None,
            breed_strategy: None,
        }
    }

    pub fn with_catalog(mut self, catalog: C) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_roster(mut self, roster: Vec<Traveler>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_traveler(mut self, traveler: Traveler) -> Self {
        self.roster.push(traveler);
        self
    }

    pub fn with_constraints(mut self, constraints: TripConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_challenge(mut self, challenge: F) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_selection_strategy(mut self, selection_strategy: S) -> Self {
        self.selection_strategy = Some(selection_strategy);
        self
    }

    pub fn with_breed_strategy(mut self, breed_strategy: B) -> Self {
        self.breed_strategy = Some(breed_strategy);
        self
    }
}

impl<C, F, S, B> EvolutionLauncherBuilder<C, F, S, B>
where
    C: FlightCatalog,
    F: Challenge,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    pub fn build(self) -> Result<EvolutionLauncher<C, F, S, B>> {
        let catalog = self
            .catalog
            .ok_or_else(|| TripError::Configuration("Flight catalog not specified".to_string()))?;

        let constraints = self.constraints.ok_or_else(|| {
            TripError::Configuration("Trip constraints not specified".to_string())
        })?;

        let challenge = self
            .challenge
            .ok_or_else(|| TripError::Configuration("Challenge not specified".to_string()))?;

        let selection_strategy = self.selection_strategy.ok_or_else(|| {
            TripError::Configuration("Selection strategy not specified".to_string())
        })?;

        let breed_strategy = self.breed_strategy.ok_or_else(|| {
            TripError::Configuration("Breeding strategy not specified".to_string())
        })?;

        EvolutionLauncher::from_parts(
            catalog,
            self.roster,
            constraints,
            self.options,
            challenge,
            selection_strategy,
            breed_strategy,
        )
    }
}

impl<C, F, S, B> Default for EvolutionLauncherBuilder<C, F, S, B> {
    fn default() -> Self {
        Self::new()
    }
}
