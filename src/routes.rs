//! # Route candidates
//!
//! For one traveler and one destination, [`RouteCandidateGenerator`] lists every outbound
//! flight inside the date window together with the return flights that fit it:
//!
//! 1. Outbound: origin → destination, departing in `[from_date, to_date]`, priced at or
//!    below the ceiling, stayovers as allowed, destination not vetoed.
//! 2. For each outbound flight: returns destination → origin departing between one day and
//!    `trip_length_days` days after the outbound departure date, priced at or below what
//!    the outbound flight leaves of the ceiling.
//! 3. Outbound flights without any return are dropped.
//!
//! Catalog errors are returned as they are; an empty answer is simply no candidates.

use chrono::Duration;
use rayon::prelude::*;
use tracing::trace;

use crate::caching::{Candidates, RouteCache};
use crate::catalog::{CatalogError, FlightCatalog, FlightQuery};
use crate::evolution::options::CacheType;
use crate::plan::{CandidateRoutePair, TripConstraints};

/// Builds candidate routes from a flight catalog under fixed trip constraints.
#[derive(Debug)]
pub struct RouteCandidateGenerator<C> {
    catalog: C,
    constraints: TripConstraints,
    cache: RouteCache,
    parallel_threshold: usize,
}

impl<C> RouteCandidateGenerator<C>
where
    C: FlightCatalog,
{
    pub fn new(catalog: C, constraints: TripConstraints) -> Self {
        Self {
            catalog,
            constraints,
            cache: RouteCache::default(),
            parallel_threshold: 1000,
        }
    }

    pub fn with_cache_type(mut self, cache_type: CacheType) -> Self {
        self.cache = RouteCache::new(cache_type);
        self
    }

    /// Rosters at least this large have their candidates derived in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn constraints(&self) -> &TripConstraints {
        &self.constraints
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Queries the catalog for every feasible (outbound, returns) pairing. Never cached.
    pub fn generate(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<CandidateRoutePair>, CatalogError> {
        let constraints = &self.constraints;
        let outbound_query = FlightQuery::new(origin, constraints.from_date(), constraints.to_date())
            .with_destination(destination)
            .with_price_max(constraints.price_max())
            .with_stayovers_allowed(constraints.stayovers_allowed())
            .with_veto(constraints.veto());

        let outbound_flights = self.catalog.query(&outbound_query)?;
        let mut candidates = Vec::with_capacity(outbound_flights.len());

        for outbound in outbound_flights {
            let return_query = FlightQuery::new(
                destination,
                outbound.departure_date + Duration::days(1),
                outbound.departure_date + Duration::days(constraints.trip_length_days() as i64),
            )
            .with_destination(origin)
            .with_price_max(constraints.price_max().map(|max| max - outbound.price_eur))
            .with_stayovers_allowed(constraints.stayovers_allowed());

            let returns = self.catalog.query(&return_query)?;
            if let Some(pair) = CandidateRoutePair::new(outbound, returns) {
                candidates.push(pair);
            }
        }

        trace!(
            origin,
            destination,
            candidates = candidates.len(),
            "Generated route candidates"
        );
        Ok(candidates)
    }

    /// Candidates for one traveler, answered from the cache when possible.
    pub fn candidates(&self, origin: &str, destination: &str) -> Result<Candidates, CatalogError> {
        self.cache
            .get_or_try_insert(origin, destination, || self.generate(origin, destination))
    }

    /// Candidates for several travelers heading to the same destination, in input order.
    ///
    /// The lookups are independent, so large rosters are processed in parallel.
    pub fn candidates_for_all(
        &self,
        origins: &[&str],
        destination: &str,
    ) -> Result<Vec<Candidates>, CatalogError> {
        if origins.len() >= self.parallel_threshold {
            origins
                .par_iter()
                .map(|origin| self.candidates(origin, destination))
                .collect()
        } else {
            origins
                .iter()
                .map(|origin| self.candidates(origin, destination))
                .collect()
        }
    }
}
