//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Not every OTP slot holds a digit.
    #[error("Please enter the complete OTP.")]
    IncompleteOtp,

    /// Signup details were lost before the OTP screen.
    #[error("Email not found. Please try signing up again.")]
    MissingEmail,

    /// A resend is already in flight.
    #[error("an OTP resend is already in progress")]
    ResendInProgress,

    /// No session is held.
    #[error("not signed in")]
    NotAuthenticated,

    /// The verification response lacked a token or user id.
    #[error("verification response did not contain a session")]
    IncompleteSession,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::NotAuthenticated | AuthError::IncompleteSession)
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
