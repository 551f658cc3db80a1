//! # Flight records
//!
//! A [`FlightOption`] is one bookable flight as reported by the flight catalog.
//! Records are immutable once produced and are shared between candidate routes
//! through `Arc`.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};

/// One flight offered by the catalog.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOption {
    pub from_city: String,
    pub to_city: String,
    /// Local calendar date of departure.
    pub departure_date: NaiveDate,
    /// Departure instant in the origin's local offset.
    pub departure_time_local: DateTime<FixedOffset>,
    /// Arrival instant in the destination's local offset.
    pub arrival_time_local: DateTime<FixedOffset>,
    pub price_eur: f64,
    pub stayovers: u32,
    pub flight_number: String,
    pub duration_hours: f64,
}

impl FlightOption {
    /// Weekday of the local departure date.
    pub fn departure_weekday(&self) -> Weekday {
        self.departure_date.weekday()
    }

    /// Departure as seconds since the Unix epoch.
    pub fn departure_timestamp(&self) -> i64 {
        self.departure_time_local.timestamp()
    }

    /// Arrival as seconds since the Unix epoch.
    pub fn arrival_timestamp(&self) -> i64 {
        self.arrival_time_local.timestamp()
    }
}

impl fmt::Display for FlightOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} → {}", self.from_city, self.to_city)?;
        writeln!(
            f,
            "    Date: {} | Departure: {} | Arrival: {}",
            self.departure_date,
            self.departure_time_local.format("%H:%M"),
            self.arrival_time_local.format("%H:%M")
        )?;
        write!(
            f,
            "    Price: €{:.2} | Stayovers: {} | Flight: {} | Duration: {}h",
            self.price_eur, self.stayovers, self.flight_number, self.duration_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn flight() -> FlightOption {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let departure = cet.with_ymd_and_hms(2025, 11, 2, 9, 15, 0).unwrap();
        FlightOption {
            from_city: "Munich".to_string(),
            to_city: "Lisbon".to_string(),
            departure_date: departure.date_naive(),
            departure_time_local: departure,
            arrival_time_local: departure + chrono::Duration::hours(3),
            price_eur: 120.5,
            stayovers: 0,
            flight_number: "LH1234".to_string(),
            duration_hours: 3.0,
        }
    }

    #[test]
    fn test_departure_weekday() {
        // 2025-11-02 is a Sunday
        assert_eq!(flight().departure_weekday(), Weekday::Sun);
    }

    #[test]
    fn test_timestamps_are_offset_independent() {
        let f = flight();
        let utc = f.departure_time_local.with_timezone(&chrono::Utc);
        assert_eq!(f.departure_timestamp(), utc.timestamp());
        assert_eq!(f.arrival_timestamp() - f.departure_timestamp(), 3 * 3600);
    }

    #[test]
    fn test_display() {
        let text = flight().to_string();
        assert!(text.contains("Munich → Lisbon"));
        assert!(text.contains("Flight: LH1234"));
        assert!(text.contains("€120.50"));
    }
}
