//! Signup OTP verification screen.

use atelier_auth::{
    AuthError, OtpInput, OtpSettings, OtpVerification, RegistrationDetails, ResendCountdown,
    UserSession, VerifyOtpResponse,
};
use atelier_data::{message_field, ApiError, Response};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::task::{cancellable, ScreenScope};
use crate::StorefrontError;

pub const RESEND_FAILED: &str = "Failed to resend OTP. Please try again.";
pub const VERIFY_FAILED: &str = "OTP verification failed. Please try again.";
pub const RESEND_SUCCEEDED: &str = "OTP resent successfully! Please check your email.";
pub const SIGNUP_SUCCEEDED: &str = "Account created successfully";

/// State of the OTP screen shown after signup.
#[derive(Debug)]
pub struct SignupFlow {
    api: StorefrontApi,
    state: AppState,
    scope: ScreenScope,
    details: RegistrationDetails,
    otp: OtpInput,
    countdown: Mutex<ResendCountdown>,
    resending: AtomicBool,
}

impl SignupFlow {
    /// Open the screen for the details just submitted, starting the
    /// initial countdown at `now`.
    pub fn new(
        api: StorefrontApi,
        state: AppState,
        details: RegistrationDetails,
        settings: &OtpSettings,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            api,
            state,
            scope: ScreenScope::new(),
            details,
            otp: OtpInput::new(settings.length),
            countdown: Mutex::new(ResendCountdown::start(settings, now)),
            resending: AtomicBool::new(false),
        }
    }

    pub fn email(&self) -> &str {
        &self.details.email
    }

    pub fn otp(&self) -> &OtpInput {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut OtpInput {
        &mut self.otp
    }

    pub fn countdown(&self) -> ResendCountdown {
        self.lock_countdown().clone()
    }

    /// Timer text, `MM:SS`.
    pub fn countdown_display(&self, now: DateTime<Utc>) -> String {
        self.lock_countdown().display(now)
    }

    /// The expiry notice, once per countdown.
    pub fn poll_expired(&self, now: DateTime<Utc>) -> Option<&'static str> {
        self.lock_countdown().poll_expired(now)
    }

    pub fn is_resending(&self) -> bool {
        self.resending.load(Ordering::SeqCst)
    }

    /// Ask the backend for a fresh code by registering again.
    ///
    /// Only one resend runs at a time. On success the countdown restarts
    /// with the longer post-resend wait.
    pub async fn resend(&self) -> Result<&'static str, StorefrontError> {
        if !self.details.has_email() {
            return Err(AuthError::MissingEmail.into());
        }
        if self.resending.swap(true, Ordering::SeqCst) {
            return Err(AuthError::ResendInProgress.into());
        }
        let _reset = ResetOnDrop(&self.resending);

        let token = self.scope.child();
        let response = match cancellable(&token, self.api.register(&self.details)).await {
            Ok(response) => response,
            Err(StorefrontError::Cancelled) => return Err(StorefrontError::Cancelled),
            Err(err) => {
                warn!(error = %err, "OTP resend failed");
                return Err(ApiError::Network(RESEND_FAILED.to_string()).into());
            }
        };

        if !response.is_success() || response.bytes().is_empty() {
            return Err(flow_error(&response, RESEND_FAILED));
        }

        self.lock_countdown().restart_after_resend(Utc::now());
        info!(email = %self.details.email, "OTP resent");
        Ok(RESEND_SUCCEEDED)
    }

    /// Verify the entered code and sign the new user in.
    pub async fn verify(&self) -> Result<UserSession, StorefrontError> {
        let Some(code) = self.otp.code() else {
            return Err(AuthError::IncompleteOtp.into());
        };
        let body = OtpVerification {
            email: self.details.email.clone(),
            otp: code,
        };

        let token = self.scope.child();
        let response = match cancellable(&token, self.api.verify_otp(&body)).await {
            Ok(response) => response,
            Err(StorefrontError::Cancelled) => return Err(StorefrontError::Cancelled),
            Err(err) => {
                warn!(error = %err, "OTP verification request failed");
                return Err(ApiError::Network(VERIFY_FAILED.to_string()).into());
            }
        };

        if !response.is_success() {
            return Err(flow_error(&response, VERIFY_FAILED));
        }

        let session = response
            .json::<VerifyOtpResponse>()?
            .into_session()
            .ok_or(AuthError::IncompleteSession)?;
        self.state.set_session(session.clone()).await;
        info!(user_id = %session.user_id, "signup verified");
        Ok(session)
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    fn lock_countdown(&self) -> std::sync::MutexGuard<'_, ResendCountdown> {
        self.countdown
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Error for a failed signup call: the server's `msg` or `error`, else
/// `fallback`.
fn flow_error(response: &Response, fallback: &str) -> StorefrontError {
    let message = message_field(response.bytes(), &["msg", "error"])
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = response.status, %message, "signup call rejected");
    ApiError::Server {
        status: response.status,
        message,
    }
    .into()
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
