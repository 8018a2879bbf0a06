use serde::{Deserialize, Serialize};

/// The account type assigned by the backend at registration
///
/// The wire format is the numeric `user_type` discriminant the backend uses.
/// Exactly one role per user and it never changes after registration, so all
/// role comparisons in the clients go through this enum.
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Role {
    Admin = 1,
    Staff = 2,
    Customer = 3,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("not a known role discriminant: {0}")]
pub struct RoleParseError(pub u8);

impl TryFrom<u8> for Role {
    type Error = RoleParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Admin),
            2 => Ok(Self::Staff),
            3 => Ok(Self::Customer),
            other => Err(RoleParseError(other)),
        }
    }
}

impl From<Role> for u8 {
    fn from(value: Role) -> Self {
        value as u8
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Customer => "Customer",
        };
        write!(f, "{display_text}")
    }
}

impl From<&Role> for egui::WidgetText {
    fn from(value: &Role) -> Self {
        value.to_string().into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case(1, Role::Admin)]
    #[case(2, Role::Staff)]
    #[case(3, Role::Customer)]
    fn role_from_discriminant(#[case] raw: u8, #[case] expected: Role) {
        let actual: Role = raw.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(255)]
    fn unknown_discriminant_rejected(#[case] raw: u8) {
        let actual: Result<Role, RoleParseError> = raw.try_into();
        assert_eq!(actual.unwrap_err(), RoleParseError(raw));
    }

    #[test]
    fn serde_round_trip_is_numeric() {
        for role in Role::iter() {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, u8::from(role).to_string());
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }
}
