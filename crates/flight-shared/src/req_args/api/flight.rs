use chrono::NaiveDate;

use crate::airport::AirportCode;

/// Query arguments for the flight search endpoint, all filters optional
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SearchReqArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<AirportCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<AirportCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl SearchReqArgs {
    pub fn is_unfiltered(&self) -> bool {
        self.departure.is_none() && self.arrival.is_none() && self.date.is_none()
    }
}
