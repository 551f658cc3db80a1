use super::{CatalogError, FlightCatalog, FlightQuery};
use crate::flight::FlightOption;

/// A catalog backed by a vector of flights.
///
/// Queries scan the whole list and return matches in insertion order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    flights: Vec<FlightOption>,
}

impl InMemoryCatalog {
    pub fn new(flights: Vec<FlightOption>) -> Self {
        Self { flights }
    }

    pub fn push(&mut self, flight: FlightOption) {
        self.flights.push(flight);
    }

    pub fn flights(&self) -> &[FlightOption] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Loads a catalog from a JSON array of flights.
    #[cfg(feature = "serde")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let flights: Vec<FlightOption> = serde_json::from_reader(reader)?;
        Ok(Self::new(flights))
    }

    /// Loads a catalog from a JSON file holding an array of flights.
    #[cfg(feature = "serde")]
    pub fn from_json_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}

impl FromIterator<FlightOption> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = FlightOption>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FlightCatalog for InMemoryCatalog {
    fn query(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, CatalogError> {
        Ok(self
            .flights
            .iter()
            .filter(|flight| query.matches(flight))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn flight(from: &str, to: &str, day: u32, price: f64) -> FlightOption {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let departure = offset.with_ymd_and_hms(2025, 3, day, 8, 30, 0).unwrap();
        FlightOption {
            from_city: from.to_string(),
            to_city: to.to_string(),
            departure_date: departure.date_naive(),
            departure_time_local: departure,
            arrival_time_local: departure + chrono::Duration::minutes(150),
            price_eur: price,
            stayovers: 0,
            flight_number: format!("AF{}", day),
            duration_hours: 2.5,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let catalog: InMemoryCatalog = vec![
            flight("Paris", "Rome", 3, 80.0),
            flight("Paris", "Oslo", 2, 60.0),
            flight("Paris", "Rome", 1, 40.0),
        ]
        .into_iter()
        .collect();

        let found = catalog
            .query(&FlightQuery::new("Paris", date(1), date(5)).with_destination("Rome"))
            .unwrap();
        let numbers: Vec<_> = found.iter().map(|f| f.flight_number.as_str()).collect();
        assert_eq!(numbers, vec!["AF3", "AF1"]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let catalog = InMemoryCatalog::default();
        assert!(catalog.is_empty());
        let found = catalog
            .query(&FlightQuery::new("Paris", date(1), date(5)))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_push_and_len() {
        let mut catalog = InMemoryCatalog::default();
        catalog.push(flight("Paris", "Rome", 3, 80.0));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.flights()[0].to_city, "Rome");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let catalog = InMemoryCatalog::new(vec![flight("Paris", "Rome", 3, 80.0)]);
        let json = serde_json::to_string(&catalog).unwrap();
        let loaded = InMemoryCatalog::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.flights(), catalog.flights());
    }
}
