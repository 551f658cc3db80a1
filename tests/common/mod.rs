#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use grouptrip::{
    catalog::{CatalogError, FlightCatalog, FlightQuery, InMemoryCatalog, SyntheticCatalog},
    flight::FlightOption,
    plan::{TripConstraints, Traveler},
};

/// Routes log output through the test harness so it shows up for failing tests only.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A direct flight departing at `hour:00` local time (UTC+1) and lasting two hours.
pub fn flight(from: &str, to: &str, day: NaiveDate, hour: u32, price: f64) -> FlightOption {
    let offset = FixedOffset::east_opt(3600).unwrap();
    let departure = offset
        .from_local_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
        .unwrap();
    FlightOption {
        from_city: from.to_string(),
        to_city: to.to_string(),
        departure_date: day,
        departure_time_local: departure,
        arrival_time_local: departure + Duration::hours(2),
        price_eur: price,
        stayovers: 0,
        flight_number: format!("{}{}{}", &from[..2].to_uppercase(), hour, price as u32),
        duration_hours: 2.0,
    }
}

pub fn roster(travelers: &[(&str, f64)]) -> Vec<Traveler> {
    travelers
        .iter()
        .map(|(origin, budget)| Traveler::new(*origin, *budget).unwrap())
        .collect()
}

pub fn constraints(
    from: NaiveDate,
    to: NaiveDate,
    days: u32,
    destinations: &[&str],
) -> TripConstraints {
    TripConstraints::builder()
        .date_window(from, to)
        .trip_length_days(days)
        .destinations(destinations.iter().copied())
        .build()
        .unwrap()
}

/// Seeded synthetic flights between `cities`, starting 2025-11-01.
pub fn synthetic(cities: &[&str], num_flights: usize, seed: u64) -> InMemoryCatalog {
    SyntheticCatalog::builder()
        .cities(cities.iter().map(|city| (*city, 1)))
        .start_date(date(2025, 11, 1))
        .horizon_days(120)
        .num_flights(num_flights)
        .seed(seed)
        .build()
        .unwrap()
}

/// Wraps a catalog and counts the queries it answers.
#[derive(Debug)]
pub struct CountingCatalog {
    inner: InMemoryCatalog,
    queries: AtomicUsize,
}

impl CountingCatalog {
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl FlightCatalog for CountingCatalog {
    fn query(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, CatalogError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(query)
    }
}
