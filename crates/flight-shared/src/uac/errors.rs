#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid User or Password")]
    InvalidUserOrPassword,
    #[error("Session expired, please log in again")]
    SessionExpired,
    #[error("Unexpected Error: {0:#}")]
    UnexpectedError(#[from] anyhow::Error),
}

impl AuthError {
    /// Returns `true` if the auth error is [`SessionExpired`]
    ///
    /// [`SessionExpired`]: AuthError::SessionExpired
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
