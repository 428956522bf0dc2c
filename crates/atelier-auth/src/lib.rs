//! Customer sessions and signup verification for Atelier.
//!
//! - [`UserSession`]: the token, user id and signup coupon held after login
//!   or OTP verification
//! - [`OtpInput`]: the six-slot one-time-code entry
//! - [`ResendCountdown`]: when the "resend code" action becomes available
//! - [`RegistrationDetails`] / [`OtpVerification`]: signup request bodies

mod countdown;
mod error;
mod otp;
mod registration;
mod session;

pub use countdown::{OtpSettings, ResendCountdown, EXPIRED_MESSAGE};
pub use error::AuthError;
pub use otp::{OtpInput, DEFAULT_OTP_LENGTH};
pub use registration::{OtpVerification, RegistrationDetails};
pub use session::{UserSession, VerifyOtpResponse};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthError, OtpInput, RegistrationDetails, ResendCountdown, UserSession};
}
