//! # Error Types
//!
//! This module defines the error types for the group trip planner.
//! Catalog failures keep their own type ([`CatalogError`]) and are wrapped
//! transparently, so callers see exactly what the catalog reported.
//!
//! ## Examples
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use grouptrip::error::{OptionExt, TripError};
//!
//! fn cheapest(prices: &[u32]) -> grouptrip::error::Result<u32> {
//!     prices.iter().min().copied().ok_or_else_trip(|| TripError::EmptyPopulation)
//! }
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use grouptrip::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_plan(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open plan file")?;
//!     Ok(())
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

pub use crate::catalog::CatalogError;

/// Represents errors that can occur while planning a group trip.
#[derive(Error, Debug)]
pub enum TripError {
    /// Error reported by the flight catalog, passed through unchanged.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when travelers or trip constraints are malformed.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness value is missing or not finite.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// No destination yielded a feasible trip for every traveler within the retry budget.
    #[error(
        "Infeasible run: no destination produced a feasible trip for every traveler after {attempts} attempts"
    )]
    InfeasibleRun { attempts: usize },

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error that occurs when JSON input or output cannot be processed.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for trip planning operations.
pub type Result<T> = std::result::Result<T, TripError>;

/// Extension trait for Result to add context to errors.
pub trait ResultExt<T, E> {
    /// Converts the error to a [`TripError::Other`] prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| TripError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TripError>` using `err_fn` for `None`.
    fn ok_or_else_trip<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TripError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_trip<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TripError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_is_transparent() {
        let inner = CatalogError::Unavailable("connection refused".to_string());
        let message = inner.to_string();
        let err: TripError = inner.into();
        assert_eq!(err.to_string(), message);
        assert!(matches!(err, TripError::Catalog(CatalogError::Unavailable(_))));
    }

    #[test]
    fn test_context_wraps_message() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("Failed to open plan").unwrap_err();
        assert_eq!(err.to_string(), "Failed to open plan: missing");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_trip(|| TripError::EmptyPopulation),
            Err(TripError::EmptyPopulation)
        ));
        assert_eq!(Some(3).ok_or_else_trip(|| TripError::EmptyPopulation).unwrap(), 3);
    }
}
