//! Customer sessions.

use atelier_commerce::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A signed-in customer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: UserId,
    pub token: String,
    /// Welcome coupon issued at signup, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
}

impl UserSession {
    pub fn new(user_id: impl Into<UserId>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            coupon: None,
        }
    }

    pub fn with_coupon(mut self, coupon: impl Into<String>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .field("coupon", &self.coupon)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifiedUser {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
}

impl VerifiedUser {
    fn id(self) -> Option<String> {
        [self.user_id, self.mongo_id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }
}

/// Body returned by OTP verification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<VerifiedUser>,
    #[serde(default)]
    coupon: Option<Value>,
}

impl VerifyOtpResponse {
    /// A session, when the response carries both a token and a user id.
    pub fn into_session(self) -> Option<UserSession> {
        let token = self.token.filter(|t| !t.is_empty())?;
        let user_id = self.user.and_then(VerifiedUser::id)?;

        let coupon = match self.coupon {
            None | Some(Value::Null) => None,
            Some(Value::String(code)) => Some(code),
            Some(other) => Some(other.to_string()),
        };

        Some(UserSession {
            user_id: UserId::new(user_id),
            token,
            coupon,
        })
    }
}
