//! # EvolutionLauncher
//!
//! Runs the generational loop for one trip plan:
//!
//! 1. **Initializing**: candidate trips are drawn until the population is full; draws in
//!    which some traveler cannot reach the sampled destination are discarded. The number
//!    of draws is capped by `max_init_attempts`.
//! 2. **Evaluating**: every trip whose fitness is unknown is scored.
//! 3. **Selecting**: a full pool of offspring is drawn from the population.
//! 4. **Reproducing**: the breed strategy recombines and mutates the pool.
//! 5. **Elitism**: the best trip of the previous generation replaces the worst offspring,
//!    so the best penalty never increases.
//!
//! [`EvolutionLauncher::evolve`] exposes the loop as a lazy [`Evolution`] iterator that
//! yields one [`ProgressUpdate`] per generation. Stopping the iteration abandons the run.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grouptrip::catalog::SyntheticCatalog;
//! use grouptrip::evolution::{EvolutionLauncher, EvolutionOptions, LogLevel, ProgressUpdate};
//! use grouptrip::plan::{TripConstraints, Traveler};
//! use grouptrip::rng::RandomNumberGenerator;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let catalog = SyntheticCatalog::builder()
//!     .cities([("Malaga", 1), ("Paris", 1), ("Munich", 1)])
//!     .start_date(start)
//!     .horizon_days(40)
//!     .num_flights(3000)
//!     .seed(21)
//!     .build()
//!     .unwrap();
//! let constraints = TripConstraints::builder()
//!     .date_window(start, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap())
//!     .trip_length_days(5)
//!     .destinations(["Munich"])
//!     .build()
//!     .unwrap();
//! let roster = vec![
//!     Traveler::new("Malaga", 250.0).unwrap(),
//!     Traveler::new("Paris", 200.0).unwrap(),
//! ];
//! let options = EvolutionOptions::builder()
//!     .num_generations(3)
//!     .population_size(6)
//!     .log_level(LogLevel::None)
//!     .build()
//!     .unwrap();
//!
//! let launcher = EvolutionLauncher::new(catalog, roster, constraints, options).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(5);
//! for update in launcher.evolve(&mut rng) {
//!     match update.unwrap() {
//!         ProgressUpdate::Generation(report) => println!("{}", report.best_score),
//!         ProgressUpdate::Completed(result) => assert_eq!(result.history.len(), 3),
//!         ProgressUpdate::Finished => break,
//!     }
//! }
//! ```

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn, Span};

use super::{
    builder::EvolutionLauncherBuilder,
    challenge::Challenge,
    fitness::TripFitness,
    options::{EvolutionOptions, LogLevel},
    progress::{GenerationReport, ProgressUpdate},
};
use crate::{
    catalog::FlightCatalog,
    error::{OptionExt, Result, TripError},
    individual::Individual,
    plan::{TripConstraints, Traveler},
    rng::RandomNumberGenerator,
    routes::RouteCandidateGenerator,
    selection::{best_index, worst_index, ElitistSelection, SelectionStrategy, TournamentSelection},
    strategy::{BreedStrategy, DestinationSwapStrategy},
};

/// Outcome of a complete run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Best trip seen during the run.
    pub best: Individual,
    /// Penalty of `best`.
    pub score: f64,
    /// Best penalty of every generation, in order.
    pub history: Vec<f64>,
}

/// Owns everything a run needs: route generation, the traveler roster, options, and the
/// fitness, selection and breeding collaborators.
#[derive(Debug)]
pub struct EvolutionLauncher<
    C,
    F = TripFitness,
    S = TournamentSelection,
    B = DestinationSwapStrategy,
> {
    generator: RouteCandidateGenerator<C>,
    roster: Vec<Traveler>,
    options: EvolutionOptions,
    challenge: F,
    selection: S,
    strategy: B,
}

impl<C> EvolutionLauncher<C>
where
    C: FlightCatalog,
{
    /// Creates a launcher with the default trip fitness, tournament selection sized by
    /// `options`, and destination-swap breeding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` for an empty roster and `Configuration` for a zero
    /// tournament size.
    pub fn new(
        catalog: C,
        roster: Vec<Traveler>,
        constraints: TripConstraints,
        options: EvolutionOptions,
    ) -> Result<Self> {
        let challenge = TripFitness::new(&constraints);
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        Self::from_parts(
            catalog,
            roster,
            constraints,
            options,
            challenge,
            selection,
            DestinationSwapStrategy,
        )
    }

    pub fn builder() -> EvolutionLauncherBuilder<C> {
        EvolutionLauncherBuilder::new()
    }
}

impl<C, F, S, B> EvolutionLauncher<C, F, S, B>
where
    C: FlightCatalog,
    F: Challenge,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    pub(crate) fn from_parts(
        catalog: C,
        roster: Vec<Traveler>,
        constraints: TripConstraints,
        options: EvolutionOptions,
        challenge: F,
        selection: S,
        strategy: B,
    ) -> Result<Self> {
        if roster.is_empty() {
            return Err(TripError::InvalidPlan(
                "At least one traveler is required".to_string(),
            ));
        }

        let generator = RouteCandidateGenerator::new(catalog, constraints)
            .with_cache_type(options.get_cache_type())
            .with_parallel_threshold(options.get_parallel_threshold());

        Ok(Self {
            generator,
            roster,
            options,
            challenge,
            selection,
            strategy,
        })
    }

    pub fn generator(&self) -> &RouteCandidateGenerator<C> {
        &self.generator
    }

    pub fn roster(&self) -> &[Traveler] {
        &self.roster
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn challenge(&self) -> &F {
        &self.challenge
    }

    /// Starts a run. Nothing is computed until the returned iterator is polled.
    pub fn evolve<'a>(&'a self, rng: &'a mut RandomNumberGenerator) -> Evolution<'a, C, F, S, B> {
        Evolution {
            launcher: self,
            rng,
            state: State::Initializing,
            history: Vec::with_capacity(self.options.get_num_generations()),
            hall_of_fame: None,
            span: info_span!(
                "evolution",
                travelers = self.roster.len(),
                population = self.options.get_population_size(),
                generations = self.options.get_num_generations()
            ),
        }
    }

    /// Runs all generations and returns the best trip.
    ///
    /// # Errors
    ///
    /// - `InfeasibleRun` if the population cannot be filled within `max_init_attempts`
    /// - `Catalog` if the flight catalog fails
    /// - `FitnessCalculation` if the challenge returns a non-finite penalty
    pub fn run(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        let mut result = None;
        for update in self.evolve(rng) {
            if let ProgressUpdate::Completed(completed) = update? {
                result = Some(completed);
            }
        }
        result.ok_or_else_trip(|| {
            TripError::Evolution("Evolution ended without a result".to_string())
        })
    }

    /// Draws trips until the population is full or the attempt budget is spent.
    fn initialize(&self, rng: &mut RandomNumberGenerator) -> Result<Vec<Individual>> {
        let size = self.options.get_population_size();
        let budget = self.options.get_max_init_attempts();
        let mut population = Vec::with_capacity(size);
        let mut attempts = 0;

        while population.len() < size {
            if attempts >= budget {
                warn!(
                    attempts,
                    feasible = population.len(),
                    "Initialization budget exhausted"
                );
                return Err(TripError::InfeasibleRun { attempts });
            }
            attempts += 1;

            match Individual::create(&self.roster, &self.generator, rng)? {
                Some(individual) => population.push(individual),
                None => debug!(attempt = attempts, "Discarded infeasible trip"),
            }
        }

        debug!(attempts, "Population initialized");
        Ok(population)
    }

    /// Scores every trip whose fitness is unknown.
    fn evaluate(&self, population: &mut [Individual]) -> Result<()> {
        let score = |individual: &mut Individual| -> Result<()> {
            if individual.fitness().is_some() {
                return Ok(());
            }
            let value = self.challenge.score(individual);
            if !value.is_finite() {
                return Err(TripError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered for a trip to {}: {}",
                    individual.destination(),
                    value
                )));
            }
            individual.set_fitness(value);
            Ok(())
        };

        if population.len() >= self.options.get_parallel_threshold() {
            population.par_iter_mut().try_for_each(score)
        } else {
            population.iter_mut().try_for_each(score)
        }
    }
}

/// Collects the fitness of an evaluated population.
fn fitness_of(population: &[Individual]) -> Result<Vec<f64>> {
    population
        .iter()
        .map(|individual| {
            individual.fitness().ok_or_else_trip(|| {
                TripError::FitnessCalculation(format!(
                    "Trip to {} was not evaluated",
                    individual.destination()
                ))
            })
        })
        .collect()
}

#[derive(Debug)]
enum State {
    Initializing,
    Running {
        population: Vec<Individual>,
        generation: usize,
    },
    Completing,
    Finishing,
    Done,
}

/// Lazy, finite stream of progress updates for one run.
///
/// Yields `num_generations` [`ProgressUpdate::Generation`] items, then
/// [`ProgressUpdate::Completed`], then [`ProgressUpdate::Finished`]. An error is yielded
/// once and ends the stream.
pub struct Evolution<'a, C, F, S, B> {
    launcher: &'a EvolutionLauncher<C, F, S, B>,
    rng: &'a mut RandomNumberGenerator,
    state: State,
    history: Vec<f64>,
    hall_of_fame: Option<(Individual, f64)>,
    span: Span,
}

impl<'a, C, F, S, B> Evolution<'a, C, F, S, B>
where
    C: FlightCatalog,
    F: Challenge,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    /// Best penalty of every generation finished so far.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    fn step(&mut self) -> Result<Option<ProgressUpdate>> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::Initializing => {
                    let mut population = self.launcher.initialize(self.rng)?;
                    self.launcher.evaluate(&mut population)?;
                    self.record(&population)?;

                    self.state = if self.launcher.options.get_num_generations() == 0 {
                        State::Completing
                    } else {
                        State::Running {
                            population,
                            generation: 0,
                        }
                    };
                }
                State::Running {
                    population,
                    generation,
                } => {
                    let (offspring, report) = self.next_generation(population, generation)?;
                    self.state = if generation + 1 >= self.launcher.options.get_num_generations() {
                        State::Completing
                    } else {
                        State::Running {
                            population: offspring,
                            generation: generation + 1,
                        }
                    };
                    return Ok(Some(ProgressUpdate::Generation(report)));
                }
                State::Completing => {
                    let (best, score) = self.hall_of_fame.clone().ok_or_else_trip(|| {
                        TripError::Evolution("No trip was evaluated".to_string())
                    })?;
                    info!(score, destination = best.destination(), "Evolution completed");
                    self.state = State::Finishing;
                    return Ok(Some(ProgressUpdate::Completed(EvolutionResult {
                        best,
                        score,
                        history: self.history.clone(),
                    })));
                }
                State::Finishing => {
                    self.state = State::Done;
                    return Ok(Some(ProgressUpdate::Finished));
                }
                State::Done => return Ok(None),
            }
        }
    }

    /// Selection, reproduction, evaluation and elitism for one generation.
    fn next_generation(
        &mut self,
        population: Vec<Individual>,
        generation: usize,
    ) -> Result<(Vec<Individual>, GenerationReport)> {
        let launcher = self.launcher;
        let options = &launcher.options;
        let fitness = fitness_of(&population)?;

        let elite = ElitistSelection::default()
            .select(&population, &fitness, 1, self.rng)?
            .pop()
            .ok_or_else_trip(|| TripError::EmptyPopulation)?;

        let mut offspring = launcher.selection.select(
            &population,
            &fitness,
            options.get_population_size(),
            self.rng,
        )?;
        launcher
            .strategy
            .breed(&mut offspring, &launcher.generator, options, self.rng)?;
        launcher.evaluate(&mut offspring)?;

        let offspring_fitness = fitness_of(&offspring)?;
        if let Some(worst) = worst_index(&offspring_fitness) {
            offspring[worst] = elite;
        }

        let (best, best_score) = self.record(&offspring)?;
        self.history.push(best_score);

        match options.get_log_level() {
            LogLevel::Minimal => info!(
                generation,
                best_score,
                destination = best.destination(),
                "Generation finished"
            ),
            LogLevel::Verbose => {
                info!(
                    generation,
                    best_score,
                    destination = best.destination(),
                    "Generation finished"
                );
                offspring.iter().for_each(|individual| {
                    debug!(
                        generation,
                        penalty = individual.fitness(),
                        "Offspring:\n{}",
                        individual
                    );
                });
            }
            LogLevel::None => {}
        }

        let report = GenerationReport {
            generation,
            best_score,
            best,
        };
        Ok((offspring, report))
    }

    /// Updates the hall of fame and returns the population's best trip.
    fn record(&mut self, population: &[Individual]) -> Result<(Individual, f64)> {
        let fitness = fitness_of(population)?;
        let idx = best_index(&fitness).ok_or_else_trip(|| TripError::EmptyPopulation)?;
        let best = population[idx].clone();
        let score = fitness[idx];

        let improved = self
            .hall_of_fame
            .as_ref()
            .map_or(true, |(_, best_so_far)| score < *best_so_far);
        if improved {
            self.hall_of_fame = Some((best.clone(), score));
        }
        Ok((best, score))
    }
}

impl<'a, C, F, S, B> Iterator for Evolution<'a, C, F, S, B>
where
    C: FlightCatalog,
    F: Challenge,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    type Item = Result<ProgressUpdate>;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.span.clone();
        let _entered = span.enter();
        match self.step() {
            Ok(update) => update.map(Ok),
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}
