pub mod builder;
pub mod challenge;
pub mod fitness;
pub mod launcher;
pub mod options;
pub mod progress;

pub use builder::EvolutionLauncherBuilder;
pub use challenge::Challenge;
pub use fitness::{FitnessBreakdown, FitnessWeights, TripFitness};
pub use launcher::{Evolution, EvolutionLauncher, EvolutionResult};
pub use options::{CacheType, EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use progress::{GenerationReport, ProgressUpdate};
