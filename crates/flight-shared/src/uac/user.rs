use std::fmt::Display;

use egui::WidgetText;

use crate::{errors::ConversionError, id::DbId};

use super::Role;

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
/// Represents a username and is constrained to not be an empty string
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 32;
}

impl TryFrom<String> for Username {
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

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Username> for WidgetText {
    fn from(value: &Username) -> Self {
        (&value.0).into()
    }
}

/// Stores the user info that is returned on login and by the profile endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: DbId,
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(rename = "user_type")]
    pub role: Role,
}

impl UserInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(33), ConversionError::MaxExceeded{max:32, actual:33})]
    fn illegal_username(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<Username, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn user_info_wire_format_uses_user_type() {
        let json = serde_json::json!({
            "id": 4,
            "username": "pat",
            "first_name": "Pat",
            "last_name": "Lee",
            "phone_number": "555-0100",
            "user_type": 3,
        });
        let user: UserInfo = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.full_name(), "Pat Lee");
    }
}
