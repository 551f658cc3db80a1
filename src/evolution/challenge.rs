use crate::individual::Individual;

/// Scores a candidate trip. Lower is better.
///
/// Implementations must be deterministic for a fixed individual and must not depend on
/// any state other than the individual itself, since scoring runs in parallel.
pub trait Challenge: Send + Sync {
    fn score(&self, individual: &Individual) -> f64;
}
