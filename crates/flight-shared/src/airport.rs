use egui::WidgetText;

use crate::{errors::ConversionError, id::DbId};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Airport {
    pub id: DbId,
    pub code: AirportCode,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AirportDraft {
    pub code: AirportCode,
    pub name: String,
    pub city: String,
    pub country: String,
}

/// IATA style airport code, exactly three ASCII letters, stored uppercase
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct AirportCode(String);

impl AirportCode {
    pub const LENGTH: usize = 3;
}

impl TryFrom<String> for AirportCode {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() != Self::LENGTH || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConversionError::WrongLength {
                expected: Self::LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value.to_ascii_uppercase()))
    }
}

impl TryFrom<&str> for AirportCode {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<AirportCode> for String {
    fn from(value: AirportCode) -> Self {
        value.0
    }
}

impl AsRef<str> for AirportCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&AirportCode> for WidgetText {
    fn from(value: &AirportCode) -> Self {
        (&value.0).into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::lower("lax", "LAX")]
    #[case::mixed("yYz", "YYZ")]
    fn code_is_uppercased(#[case] raw: &str, #[case] expect: &str) {
        let actual: AirportCode = raw.try_into().unwrap();
        assert_eq!(actual.as_ref(), expect);
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_short("JF", ConversionError::WrongLength{expected: 3, actual: 2})]
    #[case::too_long("JFKX", ConversionError::WrongLength{expected: 3, actual: 4})]
    #[case::digits("J1K", ConversionError::WrongLength{expected: 3, actual: 3})]
    fn illegal_airport_code(#[case] raw: &str, #[case] expect: ConversionError) {
        let actual: Result<AirportCode, ConversionError> = raw.try_into();
        assert_eq!(actual.unwrap_err(), expect);
    }
}
