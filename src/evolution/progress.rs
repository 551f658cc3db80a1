//! Progress values streamed by a running evolution.
//!
//! A run produces one [`ProgressUpdate::Generation`] per generation, then a single
//! [`ProgressUpdate::Completed`] carrying the best trip of the whole run, then
//! [`ProgressUpdate::Finished`] as the end-of-stream marker. The `Display` impls render
//! the human-readable summary a delivery layer can forward as is.

use std::fmt;

use super::launcher::EvolutionResult;
use crate::individual::Individual;

/// Snapshot taken after a generation has been evaluated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Lowest penalty in the population.
    pub best_score: f64,
    pub best: Individual,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    Generation(GenerationReport),
    Completed(EvolutionResult),
    Finished,
}

impl ProgressUpdate {
    pub fn is_finished(&self) -> bool {
        matches!(self, ProgressUpdate::Finished)
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generation {}: best penalty {:.4}",
            self.generation, self.best_score
        )?;
        write!(f, "{}", self.best)
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressUpdate::Generation(report) => write!(f, "{}", report),
            ProgressUpdate::Completed(result) => {
                writeln!(f, "Best trip found (penalty {:.4}):", result.score)?;
                write!(f, "{}", result.best)
            }
            ProgressUpdate::Finished => write!(f, "Optimization finished"),
        }
    }
}
