use crate::{airline::Airline, id::DbId};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Aircraft {
    pub id: DbId,
    pub registration_number: String,
    pub model: String,
    pub capacity: u32,
    pub airline: Airline,
}

/// Write shape, the backend expects the owning airline by id
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AircraftDraft {
    pub registration_number: String,
    pub model: String,
    pub capacity: u32,
    pub airline_id: DbId,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AircraftValidationError {
    #[error("Registration number is required")]
    EmptyRegistration,
    #[error("Model is required")]
    EmptyModel,
    #[error("Capacity must be at least 1")]
    ZeroCapacity,
}

impl AircraftDraft {
    pub fn validate(&self) -> Result<(), AircraftValidationError> {
        if self.registration_number.trim().is_empty() {
            return Err(AircraftValidationError::EmptyRegistration);
        }
        if self.model.trim().is_empty() {
            return Err(AircraftValidationError::EmptyModel);
        }
        if self.capacity == 0 {
            return Err(AircraftValidationError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn draft() -> AircraftDraft {
        AircraftDraft {
            registration_number: "N12345".to_string(),
            model: "A320".to_string(),
            capacity: 180,
            airline_id: 1.into(),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[rstest]
    #[case::no_registration(
        AircraftDraft { registration_number: " ".into(), ..draft() },
        AircraftValidationError::EmptyRegistration
    )]
    #[case::no_model(
        AircraftDraft { model: "".into(), ..draft() },
        AircraftValidationError::EmptyModel
    )]
    #[case::zero_capacity(
        AircraftDraft { capacity: 0, ..draft() },
        AircraftValidationError::ZeroCapacity
    )]
    fn invalid_draft_rejected(
        #[case] input: AircraftDraft,
        #[case] expect: AircraftValidationError,
    ) {
        assert_eq!(input.validate().unwrap_err(), expect);
    }
}
