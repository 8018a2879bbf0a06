use crate::token::AuthToken;

use super::UserInfo;

/// Body returned by the login endpoint
///
/// `refresh` is only present on backends configured to issue refresh tokens
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    pub access: AuthToken,
    #[serde(default)]
    pub refresh: Option<AuthToken>,
    pub user: UserInfo,
}
