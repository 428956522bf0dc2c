//! Signup request bodies.

use serde::{Deserialize, Serialize};

/// Details collected on the signup form. Posting them (again) to the
/// register endpoint sends a fresh OTP.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub is_walk_in: bool,
}

impl RegistrationDetails {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

impl std::fmt::Debug for RegistrationDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationDetails")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("is_walk_in", &self.is_walk_in)
            .finish_non_exhaustive()
    }
}

/// Body of the verify-OTP call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpVerification {
    pub email: String,
    pub otp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_wire_names() {
        let details = RegistrationDetails {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9999999999".into(),
            password: "pw".into(),
            is_walk_in: true,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["isWalkIn"], true);
        assert_eq!(json["email"], "asha@example.com");
        assert!(!format!("{:?}", details).contains("pw"));
    }

    #[test]
    fn test_has_email() {
        assert!(!RegistrationDetails::new("  ").has_email());
        assert!(RegistrationDetails::new("a@b.c").has_email());
    }
}
