use chrono::NaiveDate;

use crate::error::{Result, TripError};

/// Constraints shared by every traveler of a trip.
///
/// Built through [`TripConstraints::builder`], which rejects malformed input so the
/// optimizer never sees unset or contradictory fields.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TripConstraints {
    from_date: NaiveDate,
    to_date: NaiveDate,
    trip_length_days: u32,
    price_max: Option<f64>,
    stayovers_allowed: bool,
    veto: Vec<String>,
    preferred: Vec<String>,
    destinations: Vec<String>,
}

impl TripConstraints {
    pub fn builder() -> TripConstraintsBuilder {
        TripConstraintsBuilder::default()
    }

    /// First allowed outbound departure date.
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    /// Last allowed outbound departure date.
    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    pub fn trip_length_days(&self) -> u32 {
        self.trip_length_days
    }

    /// Ceiling on the price of a whole round trip.
    pub fn price_max(&self) -> Option<f64> {
        self.price_max
    }

    pub fn stayovers_allowed(&self) -> bool {
        self.stayovers_allowed
    }

    pub fn veto(&self) -> &[String] {
        &self.veto
    }

    pub fn preferred(&self) -> &[String] {
        &self.preferred
    }

    /// Destinations the shared trip may go to.
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}

#[derive(Debug, Clone)]
pub struct TripConstraintsBuilder {
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    trip_length_days: u32,
    price_max: Option<f64>,
    stayovers_allowed: bool,
    veto: Vec<String>,
    preferred: Vec<String>,
    destinations: Vec<String>,
}

impl Default for TripConstraintsBuilder {
    fn default() -> Self {
        Self {
            from_date: None,
            to_date: None,
            trip_length_days: 7,
            price_max: None,
            stayovers_allowed: true,
            veto: Vec::new(),
            preferred: Vec::new(),
            destinations: Vec::new(),
        }
    }
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl TripConstraintsBuilder {
    /// Sets the inclusive outbound departure window.
    pub fn date_window(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    pub fn trip_length_days(mut self, value: u32) -> Self {
        self.trip_length_days = value;
        self
    }

    pub fn price_max(mut self, value: f64) -> Self {
        self.price_max = Some(value);
        self
    }

    pub fn stayovers_allowed(mut self, value: bool) -> Self {
        self.stayovers_allowed = value;
        self
    }

    pub fn veto<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.veto = owned(cities);
        self
    }

    pub fn preferred<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred = owned(cities);
        self
    }

    pub fn destinations<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.destinations = owned(cities);
        self
    }

    pub fn build(self) -> Result<TripConstraints> {
        let (from_date, to_date) = match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(TripError::InvalidPlan(
                    "Date window not specified".to_string(),
                ))
            }
        };
        if from_date > to_date {
            return Err(TripError::InvalidPlan(format!(
                "Date window starts ({}) after it ends ({})",
                from_date, to_date
            )));
        }
        if self.trip_length_days == 0 {
            return Err(TripError::InvalidPlan(
                "Trip length must be at least one day".to_string(),
            ));
        }
        if let Some(price_max) = self.price_max {
            if !price_max.is_finite() || price_max < 0.0 {
                return Err(TripError::InvalidPlan(format!(
                    "Price ceiling must be a non-negative number, got {}",
                    price_max
                )));
            }
        }
        if self.destinations.is_empty() {
            return Err(TripError::InvalidPlan(
                "No eligible destinations specified".to_string(),
            ));
        }

        Ok(TripConstraints {
            from_date,
            to_date,
            trip_length_days: self.trip_length_days,
            price_max: self.price_max,
            stayovers_allowed: self.stayovers_allowed,
            veto: self.veto,
            preferred: self.preferred,
            destinations: self.destinations,
        })
    }
}
