use egui::WidgetText;

use crate::{errors::ConversionError, id::DbId};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Airline {
    pub id: DbId,
    pub name: AirlineName,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AirlineDraft {
    pub name: AirlineName,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AirlineName(String);

impl AirlineName {
    pub const MAX_LENGTH: usize = 60;
}

impl TryFrom<String> for AirlineName {
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

impl From<AirlineName> for String {
    fn from(value: AirlineName) -> Self {
        value.0
    }
}

impl std::fmt::Display for AirlineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&AirlineName> for WidgetText {
    fn from(value: &AirlineName) -> Self {
        (&value.0).into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(61), ConversionError::MaxExceeded{max:60, actual:61})]
    fn illegal_airline_name(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<AirlineName, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }
}
