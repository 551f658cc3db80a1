//! JSON intake for plans produced by the request parser.
//!
//! The parser answers either with a complete plan or with a description of what the
//! user still has to provide:
//!
//! ```json
//! {"missingInformation": "Please tell me the budget of each traveller."}
//! ```
//!
//! ```json
//! {
//!   "listTravellers": [{"origin": "Malaga", "budget": 300}],
//!   "travelPlan": {
//!     "fromDate": "2025-11-01", "toDate": "2026-01-29",
//!     "priceMax": 300, "days": 10, "allowStayover": true,
//!     "availableDestinations": ["Munich"]
//!   }
//! }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{TripConstraints, TripPlan, Traveler};
use crate::error::{Result, ResultExt, TripError};

/// What the request parser produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Ready(TripPlan),
    /// The request lacked required fields; the text tells the user which.
    MissingInformation(String),
}

impl PlanOutcome {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawOutcome = serde_json::from_str(json)?;
        raw.into_outcome()
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read plan file {}", path.display()))?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOutcome {
    Missing {
        #[serde(rename = "missingInformation")]
        missing_information: String,
    },
    Plan {
        #[serde(rename = "listTravellers")]
        travelers: Vec<RawTraveler>,
        #[serde(rename = "travelPlan")]
        plan: RawTravelPlan,
    },
}

#[derive(Debug, Deserialize)]
struct RawTraveler {
    origin: String,
    #[serde(default)]
    budget: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTravelPlan {
    from_date: NaiveDate,
    to_date: NaiveDate,
    veto_cities: Option<Vec<String>>,
    preferred_cities: Option<Vec<String>>,
    price_max: Option<f64>,
    days: Option<u32>,
    allow_stayover: Option<bool>,
    available_destinations: Option<Vec<String>>,
}

impl RawOutcome {
    fn into_outcome(self) -> Result<PlanOutcome> {
        match self {
            RawOutcome::Missing {
                missing_information,
            } => Ok(PlanOutcome::MissingInformation(missing_information)),
            RawOutcome::Plan { travelers, plan } => {
                if travelers.is_empty() {
                    return Err(TripError::InvalidPlan(
                        "Plan lists no travellers".to_string(),
                    ));
                }
                let travelers = travelers
                    .into_iter()
                    .map(|t| Traveler::new(t.origin, t.budget))
                    .collect::<Result<Vec<_>>>()?;

                let destinations = plan.available_destinations.ok_or_else(|| {
                    TripError::InvalidPlan("availableDestinations is required".to_string())
                })?;
                let mut builder = TripConstraints::builder()
                    .date_window(plan.from_date, plan.to_date)
                    .veto(plan.veto_cities.unwrap_or_default())
                    .preferred(plan.preferred_cities.unwrap_or_default())
                    .stayovers_allowed(plan.allow_stayover.unwrap_or(true))
                    .destinations(destinations);
                if let Some(days) = plan.days {
                    builder = builder.trip_length_days(days);
                }
                if let Some(price_max) = plan.price_max {
                    builder = builder.price_max(price_max);
                }

                Ok(PlanOutcome::Ready(TripPlan {
                    travelers,
                    constraints: builder.build()?,
                }))
            }
        }
    }
}
