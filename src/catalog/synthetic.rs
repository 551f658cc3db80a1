//! # Synthetic flights
//!
//! Generates a reproducible [`InMemoryCatalog`] of random point-to-point flights between
//! a set of cities. Prices start from a random base fare and are adjusted by booking
//! horizon, weekday, stayovers, peak hours, flight duration, holidays and summer demand.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grouptrip::catalog::SyntheticCatalog;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let catalog = SyntheticCatalog::builder()
//!     .start_date(start)
//!     .num_flights(500)
//!     .seed(11)
//!     .build()
//!     .unwrap();
//! assert_eq!(catalog.len(), 500);
//! ```

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Weekday};

use super::InMemoryCatalog;
use crate::error::{OptionExt, Result, TripError};
use crate::flight::FlightOption;
use crate::rng::RandomNumberGenerator;

const AIRLINES: [&str; 8] = ["LH", "AF", "BA", "IB", "KL", "SK", "LO", "AZ"];

const SUMMER_HOTSPOTS: [&str; 22] = [
    "Barcelona", "Nice", "Athens", "Rome", "Lisbon", "Split", "Valletta", "Dubrovnik",
    "Palermo", "Malta", "Marseille", "Seville", "Valencia", "Porto", "Thessaloniki",
    "Naples", "Santorini", "Ibiza", "Mykonos", "Cannes", "Corfu", "Malaga",
];

/// Fixed-date holidays as (month, day).
const HOLIDAYS: [(u32, u32); 5] = [(1, 1), (5, 1), (12, 24), (12, 25), (12, 31)];

/// Standard-time UTC offsets in hours.
const EUROPEAN_CITIES: [(&str, i32); 24] = [
    ("London", 0),
    ("Dublin", 0),
    ("Lisbon", 0),
    ("Porto", 0),
    ("Paris", 1),
    ("Marseille", 1),
    ("Brussels", 1),
    ("Amsterdam", 1),
    ("Berlin", 1),
    ("Munich", 1),
    ("Vienna", 1),
    ("Zurich", 1),
    ("Prague", 1),
    ("Warsaw", 1),
    ("Rome", 1),
    ("Milan", 1),
    ("Naples", 1),
    ("Madrid", 1),
    ("Barcelona", 1),
    ("Malaga", 1),
    ("Copenhagen", 1),
    ("Athens", 2),
    ("Helsinki", 2),
    ("Bucharest", 2),
];

/// Entry point for synthetic catalogs.
pub struct SyntheticCatalog;

impl SyntheticCatalog {
    pub fn builder() -> SyntheticCatalogBuilder {
        SyntheticCatalogBuilder::default()
    }
}

/// Builder for a synthetic [`InMemoryCatalog`].
#[derive(Debug, Clone)]
pub struct SyntheticCatalogBuilder {
    cities: Vec<(String, i32)>,
    start_date: Option<NaiveDate>,
    horizon_days: u32,
    num_flights: usize,
    seed: Option<u64>,
}

impl Default for SyntheticCatalogBuilder {
    fn default() -> Self {
        Self {
            cities: EUROPEAN_CITIES
                .iter()
                .map(|(city, offset)| (city.to_string(), *offset))
                .collect(),
            start_date: None,
            horizon_days: 180,
            num_flights: 20_000,
            seed: None,
        }
    }
}

impl SyntheticCatalogBuilder {
    /// Replaces the city table. Offsets are whole hours east of UTC.
    pub fn cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        self.cities = cities
            .into_iter()
            .map(|(city, offset)| (city.into(), offset))
            .collect();
        self
    }

    /// First departure date; also the reference "today" for horizon pricing.
    pub fn start_date(mut self, value: NaiveDate) -> Self {
        self.start_date = Some(value);
        self
    }

    pub fn horizon_days(mut self, value: u32) -> Self {
        self.horizon_days = value;
        self
    }

    pub fn num_flights(mut self, value: usize) -> Self {
        self.num_flights = value;
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn build(self) -> Result<InMemoryCatalog> {
        if self.cities.len() < 2 {
            return Err(TripError::Configuration(
                "Synthetic catalog needs at least two cities".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(TripError::Configuration(
                "Synthetic catalog horizon must be at least one day".to_string(),
            ));
        }

        let start = self
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let mut rng = match self.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        let mut flights = Vec::with_capacity(self.num_flights);
        for _ in 0..self.num_flights {
            flights.push(self.random_flight(start, &mut rng)?);
        }
        Ok(InMemoryCatalog::new(flights))
    }

    fn random_flight(
        &self,
        start: NaiveDate,
        rng: &mut RandomNumberGenerator,
    ) -> Result<FlightOption> {
        let invalid = || TripError::Configuration("Invalid synthetic flight parameters".to_string());

        let from_idx = rng.index(self.cities.len()).ok_or_else_trip(invalid)?;
        let mut to_idx = rng.index(self.cities.len() - 1).ok_or_else_trip(invalid)?;
        if to_idx >= from_idx {
            to_idx += 1;
        }
        let (from_city, from_offset) = &self.cities[from_idx];
        let (to_city, to_offset) = &self.cities[to_idx];
        let from_tz = FixedOffset::east_opt(from_offset * 3600).ok_or_else_trip(invalid)?;
        let to_tz = FixedOffset::east_opt(to_offset * 3600).ok_or_else_trip(invalid)?;

        let day = rng.index(self.horizon_days as usize).ok_or_else_trip(invalid)?;
        let departure_date = start + Duration::days(day as i64);
        let hour = 5 + rng.index(18).ok_or_else_trip(invalid)? as u32;
        let minute = *rng.choose(&[0u32, 15, 30, 45]).ok_or_else_trip(invalid)?;
        let naive = departure_date
            .and_hms_opt(hour, minute, 0)
            .ok_or_else_trip(invalid)?;
        let departure = from_tz
            .from_local_datetime(&naive)
            .single()
            .ok_or_else_trip(invalid)?;

        let base_price = 10.0 + rng.index(291).ok_or_else_trip(invalid)? as f64;
        let duration_hours = (rng.uniform(1.0, 5.0) * 10.0).round() / 10.0;
        let stayovers = rng.index(2).ok_or_else_trip(invalid)? as u32;
        let arrival = (departure + Duration::minutes((duration_hours * 60.0).round() as i64))
            .with_timezone(&to_tz);

        let airline = rng.choose(&AIRLINES).ok_or_else_trip(invalid)?;
        let number = 100 + rng.index(9900).ok_or_else_trip(invalid)?;

        Ok(FlightOption {
            from_city: from_city.clone(),
            to_city: to_city.clone(),
            departure_date,
            departure_time_local: departure,
            arrival_time_local: arrival,
            price_eur: dynamic_price(
                base_price,
                &departure.naive_local(),
                start,
                stayovers,
                duration_hours,
                to_city,
            ),
            stayovers,
            flight_number: format!("{}{}", airline, number),
            duration_hours,
        })
    }
}

/// Demand-adjusted fare, rounded to cents.
///
/// `today` is the booking date the horizon multipliers are measured from.
pub fn dynamic_price(
    base_price: f64,
    departure: &NaiveDateTime,
    today: NaiveDate,
    stayovers: u32,
    duration_hours: f64,
    to_city: &str,
) -> f64 {
    let date = departure.date();
    let days_until_departure = (date - today).num_days();
    let mut price = base_price;

    if days_until_departure < 7 {
        price *= 1.5;
    } else if days_until_departure < 30 {
        price *= 1.35;
    } else if days_until_departure < 60 {
        price *= 1.2;
    } else if days_until_departure > 120 {
        price *= 0.85;
    }

    if matches!(date.weekday(), Weekday::Fri | Weekday::Sat) {
        price *= 1.15;
    }

    if stayovers == 1 {
        price *= 0.85;
    }

    let hour = departure.hour();
    if (7..=9).contains(&hour) || (17..=20).contains(&hour) {
        price *= 1.1;
    }

    price *= 1.0 + duration_hours / 10.0;

    if HOLIDAYS.contains(&(date.month(), date.day())) {
        price *= 1.25;
    }

    if SUMMER_HOTSPOTS.contains(&to_city) && (6..=8).contains(&date.month()) {
        price *= 1.3;
    }

    (price * 100.0).round() / 100.0
}
