//! Resend-code countdown.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::otp::DEFAULT_OTP_LENGTH;

/// Shown once when the countdown runs out.
pub const EXPIRED_MESSAGE: &str = "Time's up! Please request a new OTP.";

/// OTP screen settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpSettings {
    pub length: usize,
    /// Wait before the first resend is offered.
    pub initial_countdown_secs: u32,
    /// Wait after each successful resend.
    pub resend_countdown_secs: u32,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            length: DEFAULT_OTP_LENGTH,
            initial_countdown_secs: 30,
            resend_countdown_secs: 300,
        }
    }
}

/// Deadline after which the resend button replaces the timer.
///
/// Time is passed in rather than read so screens and tests share one clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    deadline: DateTime<Utc>,
    resend_wait: Duration,
    expiry_reported: bool,
}

impl ResendCountdown {
    /// Start the initial countdown at `now`.
    pub fn start(settings: &OtpSettings, now: DateTime<Utc>) -> Self {
        Self {
            deadline: now + Duration::seconds(settings.initial_countdown_secs.into()),
            resend_wait: Duration::seconds(settings.resend_countdown_secs.into()),
            expiry_reported: false,
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Time left, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// `MM:SS` of the time left, seconds rounded down.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        let secs = self.remaining(now).num_seconds();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Restart with the longer post-resend wait.
    pub fn restart_after_resend(&mut self, now: DateTime<Utc>) {
        self.deadline = now + self.resend_wait;
        self.expiry_reported = false;
    }

    /// The expiry message, the first time it is polled after the deadline.
    pub fn poll_expired(&mut self, now: DateTime<Utc>) -> Option<&'static str> {
        if self.expiry_reported || !self.is_expired(now) {
            return None;
        }
        self.expiry_reported = true;
        Some(EXPIRED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_initial_countdown() {
        let countdown = ResendCountdown::start(&OtpSettings::default(), t0());
        assert_eq!(countdown.display(t0()), "00:30");
        assert!(!countdown.is_expired(t0() + Duration::seconds(29)));
        assert!(countdown.is_expired(t0() + Duration::seconds(30)));
        assert_eq!(countdown.display(t0() + Duration::seconds(45)), "00:00");
    }

    #[test]
    fn test_display_rounds_down() {
        let countdown = ResendCountdown::start(&OtpSettings::default(), t0());
        assert_eq!(countdown.display(t0() + Duration::milliseconds(500)), "00:29");
    }

    #[test]
    fn test_restart_after_resend() {
        let mut countdown = ResendCountdown::start(&OtpSettings::default(), t0());
        let later = t0() + Duration::seconds(40);
        assert_eq!(countdown.poll_expired(later), Some(EXPIRED_MESSAGE));

        countdown.restart_after_resend(later);
        assert_eq!(countdown.display(later), "05:00");
        assert_eq!(countdown.poll_expired(later + Duration::seconds(299)), None);
        assert_eq!(
            countdown.poll_expired(later + Duration::seconds(300)),
            Some(EXPIRED_MESSAGE)
        );
    }

    #[test]
    fn test_expiry_reported_once() {
        let mut countdown = ResendCountdown::start(&OtpSettings::default(), t0());
        let after = t0() + Duration::seconds(31);
        assert!(countdown.poll_expired(after).is_some());
        assert!(countdown.poll_expired(after).is_none());
    }

    #[test]
    fn test_settings_defaults_from_partial_toml_shape() {
        let settings: OtpSettings = serde_json::from_str(r#"{"resend_countdown_secs": 120}"#).unwrap();
        assert_eq!(settings.length, 6);
        assert_eq!(settings.initial_countdown_secs, 30);
        assert_eq!(settings.resend_countdown_secs, 120);
    }
}
