//! # Flight Catalog
//!
//! The planner never owns flight data. It reads it through the [`FlightCatalog`]
//! capability, which answers a [`FlightQuery`] with every matching [`FlightOption`].
//! An empty answer is a valid answer.
//!
//! Two catalogs ship with the crate:
//!
//! - [`InMemoryCatalog`]: a list of flights filtered on every query.
//! - [`SyntheticCatalog`]: a seeded generator producing an `InMemoryCatalog` of random
//!   European flights with demand-based pricing, handy for demos and benchmarks.

pub mod memory;
pub mod synthetic;

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::flight::FlightOption;

pub use memory::InMemoryCatalog;
pub use synthetic::{SyntheticCatalog, SyntheticCatalogBuilder};

/// Errors reported by a flight catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog could not be reached or refused the query.
    #[error("Flight catalog unavailable: {0}")]
    Unavailable(String),

    /// Reading catalog data failed.
    #[error("Flight catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog data could not be decoded.
    #[cfg(feature = "serde")]
    #[error("Flight catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only flight lookup.
///
/// Implementations must be side-effect free: two identical queries against an unchanged
/// catalog return the same flights.
pub trait FlightCatalog: Send + Sync {
    fn query(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, CatalogError>;
}

impl<T: FlightCatalog + ?Sized> FlightCatalog for &T {
    fn query(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, CatalogError> {
        (**self).query(query)
    }
}

impl<T: FlightCatalog + ?Sized> FlightCatalog for Arc<T> {
    fn query(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, CatalogError> {
        (**self).query(query)
    }
}

/// Filter for a catalog lookup.
///
/// Only `origin` and the date window are mandatory; every other filter is skipped when
/// unset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: Option<String>,
    /// First departure date, inclusive.
    pub from_date: NaiveDate,
    /// Last departure date, inclusive.
    pub to_date: NaiveDate,
    pub price_max: Option<f64>,
    pub stayovers_allowed: bool,
    pub veto: Option<Vec<String>>,
    pub preferred: Option<Vec<String>>,
}

impl FlightQuery {
    pub fn new(origin: impl Into<String>, from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: None,
            from_date,
            to_date,
            price_max: None,
            stayovers_allowed: true,
            veto: None,
            preferred: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_price_max(mut self, price_max: Option<f64>) -> Self {
        self.price_max = price_max;
        self
    }

    pub fn with_stayovers_allowed(mut self, allowed: bool) -> Self {
        self.stayovers_allowed = allowed;
        self
    }

    /// Excludes flights landing in any of `cities`. An empty list disables the filter.
    pub fn with_veto(mut self, cities: &[String]) -> Self {
        self.veto = (!cities.is_empty()).then(|| cities.to_vec());
        self
    }

    /// Keeps only flights landing in one of `cities`. An empty list disables the filter.
    pub fn with_preferred(mut self, cities: &[String]) -> Self {
        self.preferred = (!cities.is_empty()).then(|| cities.to_vec());
        self
    }

    /// Whether `flight` satisfies every filter of this query.
    pub fn matches(&self, flight: &FlightOption) -> bool {
        if flight.from_city != self.origin {
            return false;
        }
        if let Some(destination) = &self.destination {
            if &flight.to_city != destination {
                return false;
            }
        }
        if flight.departure_date < self.from_date || flight.departure_date > self.to_date {
            return false;
        }
        if let Some(price_max) = self.price_max {
            if flight.price_eur > price_max {
                return false;
            }
        }
        if !self.stayovers_allowed && flight.stayovers > 0 {
            return false;
        }
        if let Some(veto) = &self.veto {
            if veto.iter().any(|city| city == &flight.to_city) {
                return false;
            }
        }
        if let Some(preferred) = &self.preferred {
            if !preferred.iter().any(|city| city == &flight.to_city) {
                return false;
            }
        }
        true
    }
}
