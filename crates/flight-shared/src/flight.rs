use chrono::{DateTime, Utc};
use egui::WidgetText;

use crate::{aircraft::Aircraft, airline::Airline, airport::Airport, errors::ConversionError, id::DbId};

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct FlightNumber(String);

impl FlightNumber {
    pub const MAX_LENGTH: usize = 10;
}

impl TryFrom<String> for FlightNumber {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl From<FlightNumber> for String {
    fn from(value: FlightNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&FlightNumber> for WidgetText {
    fn from(value: &FlightNumber) -> Self {
        (&value.0).into()
    }
}

/// Cabin class a seat is sold in, scales the displayed price
#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum FareClass {
    #[default]
    Economy,
    Business,
    FirstClass,
}

impl FareClass {
    /// Multiplier applied to the base price for display purposes only, the
    /// backend remains the pricing authority
    pub fn multiplier(&self) -> f64 {
        match self {
            FareClass::Economy => 1.0,
            FareClass::Business => 1.5,
            FareClass::FirstClass => 2.5,
        }
    }
}

impl std::fmt::Display for FareClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            FareClass::Economy => "Economy",
            FareClass::Business => "Business",
            FareClass::FirstClass => "First Class",
        };
        write!(f, "{display_text}")
    }
}

#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    #[default]
    Scheduled,
    Boarding,
    Delayed,
    Cancelled,
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        };
        write!(f, "{display_text}")
    }
}

/// Read shape served by the backend, related records arrive nested
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Flight {
    pub id: DbId,
    pub flight_number: FlightNumber,
    pub airline: Airline,
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: f64,
    pub available_seats: u32,
    #[serde(default)]
    pub flight_type: FareClass,
    #[serde(default)]
    pub status: FlightStatus,
    #[serde(default)]
    pub aircraft: Option<Aircraft>,
}

impl Flight {
    pub fn route(&self) -> String {
        format!(
            "{} -> {}",
            self.departure_airport.code, self.arrival_airport.code
        )
    }
}

/// Write shape, related records are referenced by id
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FlightDraft {
    pub flight_number: FlightNumber,
    pub airline_id: DbId,
    pub departure_airport_id: DbId,
    pub arrival_airport_id: DbId,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: f64,
    pub available_seats: u32,
    pub flight_type: FareClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_id: Option<DbId>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlightValidationError {
    #[error("Departure time must be before arrival time")]
    DepartureNotBeforeArrival,
    #[error("Departure and arrival airports must differ")]
    SameAirports,
    #[error("Base price cannot be negative")]
    NegativePrice,
}

impl FlightDraft {
    /// Client side checks run before a draft is allowed onto the network, the
    /// backend revalidates everything
    pub fn validate(&self) -> Result<(), FlightValidationError> {
        if self.departure_time >= self.arrival_time {
            return Err(FlightValidationError::DepartureNotBeforeArrival);
        }
        if self.departure_airport_id == self.arrival_airport_id {
            return Err(FlightValidationError::SameAirports);
        }
        // Also catches NaN
        if !(self.base_price >= 0.0) {
            return Err(FlightValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// Price shown to the user before the backend confirms a booking
pub fn quote_price(base_price: f64, seats: u32, class: FareClass) -> f64 {
    base_price * class.multiplier() * f64::from(seats)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn draft() -> FlightDraft {
        FlightDraft {
            flight_number: "FB101".to_string().try_into().unwrap(),
            airline_id: 1.into(),
            departure_airport_id: 10.into(),
            arrival_airport_id: 11.into(),
            departure_time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            base_price: 199.99,
            available_seats: 180,
            flight_type: FareClass::Economy,
            aircraft_id: None,
        }
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("FB123456789", ConversionError::MaxExceeded{max:10, actual:11})]
    fn illegal_flight_number(#[case] raw: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<FlightNumber, ConversionError> = raw.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn complete_draft_is_valid() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn departure_after_arrival_rejected() {
        let mut draft = draft();
        std::mem::swap(&mut draft.departure_time, &mut draft.arrival_time);
        assert_eq!(
            draft.validate().unwrap_err(),
            FlightValidationError::DepartureNotBeforeArrival
        );
    }

    #[test]
    fn departure_equal_to_arrival_rejected() {
        let mut draft = draft();
        draft.arrival_time = draft.departure_time;
        assert_eq!(
            draft.validate().unwrap_err(),
            FlightValidationError::DepartureNotBeforeArrival
        );
    }

    #[test]
    fn same_airports_rejected() {
        let mut draft = draft();
        draft.arrival_airport_id = draft.departure_airport_id;
        assert_eq!(
            draft.validate().unwrap_err(),
            FlightValidationError::SameAirports
        );
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    fn bad_price_rejected(#[case] price: f64) {
        let mut draft = draft();
        draft.base_price = price;
        assert_eq!(
            draft.validate().unwrap_err(),
            FlightValidationError::NegativePrice
        );
    }

    #[rstest]
    #[case::economy(FareClass::Economy, 1, 100.0)]
    #[case::economy_three_seats(FareClass::Economy, 3, 300.0)]
    #[case::business(FareClass::Business, 2, 300.0)]
    #[case::first(FareClass::FirstClass, 2, 500.0)]
    fn quoted_price_scales_with_seats_and_class(
        #[case] class: FareClass,
        #[case] seats: u32,
        #[case] expect: f64,
    ) {
        assert!((quote_price(100.0, seats, class) - expect).abs() < f64::EPSILON);
    }

    #[test]
    fn wire_format_round_trip() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["flight_type"], "economy");
        assert!(json.get("aircraft_id").is_none());
        let back: FlightDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back.validate(), Ok(()));
    }
}
