#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AuthToken(String);

impl AuthToken {
    /// Value for the `Authorization` header
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The two durable entries the client keeps between runs
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: AuthToken,
    pub refresh: Option<AuthToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_value_includes_scheme() {
        let token: AuthToken = "abc123".to_string().into();
        assert_eq!(token.bearer_value(), "Bearer abc123");
    }
}
