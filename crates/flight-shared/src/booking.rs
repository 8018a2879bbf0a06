use chrono::NaiveDate;

use crate::{const_config::client::CLIENT_MAX_SEATS_PER_BOOKING, flight::Flight, id::DbId, uac::UserInfo};

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
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        };
        write!(f, "{display_text}")
    }
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl Passenger {
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.passport_number.trim().is_empty()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Booking {
    pub id: DbId,
    pub booking_reference: String,
    /// Only present on the staff/admin listings
    #[serde(default)]
    pub user: Option<UserInfo>,
    pub flight: Flight,
    pub seats_booked: u32,
    pub status: BookingStatus,
    pub total_price: f64,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
}

/// Write shape for creating a booking
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingDraft {
    pub flight_id: DbId,
    pub seats_booked: u32,
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingValidationError {
    #[error("At least one seat must be booked")]
    NoSeats,
    #[error("At most {max} seats can be booked at once")]
    TooManySeats { max: u32 },
    #[error("Only {available} seats are available on this flight")]
    ExceedsAvailability { available: u32 },
    #[error("Expected {seats} passenger records but found {passengers}")]
    SeatPassengerMismatch { seats: u32, passengers: usize },
    #[error("Passenger {number} is missing a name or passport number")]
    IncompletePassenger { number: usize },
}

impl BookingDraft {
    /// Client side checks run before a draft is allowed onto the network
    pub fn validate(&self, available_seats: u32) -> Result<(), BookingValidationError> {
        if self.seats_booked == 0 {
            return Err(BookingValidationError::NoSeats);
        }
        if self.seats_booked > CLIENT_MAX_SEATS_PER_BOOKING {
            return Err(BookingValidationError::TooManySeats {
                max: CLIENT_MAX_SEATS_PER_BOOKING,
            });
        }
        if self.seats_booked > available_seats {
            return Err(BookingValidationError::ExceedsAvailability {
                available: available_seats,
            });
        }
        if self.passengers.len() != self.seats_booked as usize {
            return Err(BookingValidationError::SeatPassengerMismatch {
                seats: self.seats_booked,
                passengers: self.passengers.len(),
            });
        }
        if let Some(i) = self.passengers.iter().position(|p| !p.is_complete()) {
            return Err(BookingValidationError::IncompletePassenger { number: i + 1 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn passenger() -> Passenger {
        Passenger {
            first_name: "Pat".to_string(),
            last_name: "Lee".to_string(),
            passport_number: "X1234567".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
        }
    }

    fn draft(seats: u32, passengers: usize) -> BookingDraft {
        BookingDraft {
            flight_id: 3.into(),
            seats_booked: seats,
            passengers: (0..passengers).map(|_| passenger()).collect(),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert_eq!(draft(2, 2).validate(50), Ok(()));
    }

    #[rstest]
    #[case::no_seats(0, 0, 50, BookingValidationError::NoSeats)]
    #[case::too_many(10, 10, 50, BookingValidationError::TooManySeats { max: 9 })]
    #[case::exceeds_availability(3, 3, 2, BookingValidationError::ExceedsAvailability { available: 2 })]
    #[case::missing_passenger(2, 1, 50, BookingValidationError::SeatPassengerMismatch { seats: 2, passengers: 1 })]
    fn invalid_draft_rejected(
        #[case] seats: u32,
        #[case] passengers: usize,
        #[case] available: u32,
        #[case] expect: BookingValidationError,
    ) {
        assert_eq!(draft(seats, passengers).validate(available).unwrap_err(), expect);
    }

    #[test]
    fn incomplete_passenger_is_named() {
        let mut input = draft(2, 2);
        input.passengers[1].passport_number.clear();
        assert_eq!(
            input.validate(50).unwrap_err(),
            BookingValidationError::IncompletePassenger { number: 2 }
        );
    }
}
