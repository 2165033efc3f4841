//! Credentials handed to a connection.

use core::fmt;

/// Token sent with every API request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// Raw token value
    pub value: String,
    /// Where the token was found, for diagnostics
    pub source: String,
}

impl AuthToken {
    pub fn new(value: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: source.into(),
        }
    }

    /// Get the authorization header value
    #[must_use]
    pub fn auth_header(&self) -> String {
        format!("token {}", self.value)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}
