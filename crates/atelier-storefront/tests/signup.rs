mod common;

use atelier_auth::{AuthError, OtpSettings, RegistrationDetails};
use atelier_data::mocks::{MockReply, MockTransport};
use atelier_data::{FetchError, Method};
use atelier_storefront::signup::{RESEND_FAILED, RESEND_SUCCEEDED, VERIFY_FAILED};
use atelier_storefront::{AppState, SignupFlow, StorefrontError};
use chrono::{TimeZone, Utc};
use common::*;
use serde_json::json;
use std::sync::Arc;

const REGISTER: &str = "/user/auth/register";
const VERIFY: &str = "/user/auth/register/verify-otp";

fn details() -> RegistrationDetails {
    let mut details = RegistrationDetails::new("asha@example.com");
    details.name = "Asha".to_string();
    details.password = "hunter22".to_string();
    details
}

fn flow(mock: &MockTransport, state: &AppState, details: RegistrationDetails) -> SignupFlow {
    let opened = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    SignupFlow::new(api(mock), state.clone(), details, &OtpSettings::default(), opened)
}

#[tokio::test]
async fn test_initial_countdown() {
    let mock = MockTransport::new();
    let signup = flow(&mock, &AppState::new(), details());
    let opened = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

    assert_eq!(signup.countdown_display(opened), "00:30");
    assert_eq!(signup.poll_expired(opened), None);
    let later = opened + chrono::Duration::seconds(31);
    assert!(signup.poll_expired(later).is_some());
    assert_eq!(signup.poll_expired(later), None);
}

#[tokio::test]
async fn test_verify_needs_every_digit() {
    let mock = MockTransport::new();
    let mut signup = flow(&mock, &AppState::new(), details());
    signup.otp_mut().input(0, "4");

    let err = signup.verify().await.unwrap_err();
    assert_eq!(err, StorefrontError::Auth(AuthError::IncompleteOtp));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_verify_signs_user_in() {
    let mock = MockTransport::new();
    reply_json(
        &mock,
        Method::Post,
        VERIFY,
        200,
        json!({ "token": "jwt", "user": { "_id": "u9" }, "coupon": "WELCOME10" }),
    )
    .await;

    let state = AppState::new();
    let mut signup = flow(&mock, &state, details());
    assert!(signup.otp_mut().paste("123456"));

    let session = signup.verify().await.unwrap();
    assert_eq!(session.user_id.as_str(), "u9");
    assert_eq!(session.coupon.as_deref(), Some("WELCOME10"));
    assert!(state.is_signed_in().await);

    let sent = mock.requests_to(Method::Post, VERIFY).await;
    let body = sent[0].body.as_ref().and_then(|b| b.as_json()).unwrap();
    assert_eq!(body, json!({ "email": "asha@example.com", "otp": "123456" }));
}

#[tokio::test]
async fn test_verify_rejection_message() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, VERIFY, 400, json!({ "msg": "Invalid OTP" })).await;
    reply_json(&mock, Method::Post, VERIFY, 400, json!({ "message": "ignored" })).await;

    let state = AppState::new();
    let mut signup = flow(&mock, &state, details());
    signup.otp_mut().paste("000000");

    let err = signup.verify().await.unwrap_err();
    assert_eq!(err.user_messages(), vec!["Invalid OTP"]);

    let err = signup.verify().await.unwrap_err();
    assert_eq!(err.user_messages(), vec![VERIFY_FAILED]);
    assert!(!state.is_signed_in().await);
}

#[tokio::test]
async fn test_verify_without_session_data() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, VERIFY, 200, json!({ "message": "ok" })).await;

    let state = AppState::new();
    let mut signup = flow(&mock, &state, details());
    signup.otp_mut().paste("123456");

    let err = signup.verify().await.unwrap_err();
    assert_eq!(err, StorefrontError::Auth(AuthError::IncompleteSession));
    assert!(!state.is_signed_in().await);
}

#[tokio::test]
async fn test_resend_restarts_long_countdown() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, REGISTER, 200, json!({ "message": "OTP sent" })).await;

    let signup = flow(&mock, &AppState::new(), details());
    assert_eq!(signup.resend().await.unwrap(), RESEND_SUCCEEDED);
    assert!(!signup.is_resending());

    let remaining = signup.countdown().remaining(Utc::now());
    assert!(remaining > chrono::Duration::seconds(290));
    assert!(remaining <= chrono::Duration::seconds(300));

    let sent = mock.requests_to(Method::Post, REGISTER).await;
    let body = sent[0].body.as_ref().and_then(|b| b.as_json()).unwrap();
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["name"], "Asha");
}

#[tokio::test]
async fn test_resend_failures() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, REGISTER, 429, json!({ "error": "Too many requests" })).await;
    reply_json(&mock, Method::Post, REGISTER, 500, json!({})).await;
    mock.reply(
        Method::Post,
        REGISTER,
        MockReply::fail(FetchError::RequestError("connection refused".to_string())),
    )
    .await;

    let signup = flow(&mock, &AppState::new(), details());
    let before = signup.countdown();

    assert_eq!(signup.resend().await.unwrap_err().user_messages(), vec!["Too many requests"]);
    assert_eq!(signup.resend().await.unwrap_err().user_messages(), vec![RESEND_FAILED]);
    assert_eq!(signup.resend().await.unwrap_err().user_messages(), vec![RESEND_FAILED]);
    assert_eq!(signup.countdown(), before);
    assert!(!signup.is_resending());
}

#[tokio::test]
async fn test_resend_needs_email() {
    let mock = MockTransport::new();
    let signup = flow(&mock, &AppState::new(), RegistrationDetails::new(""));

    let err = signup.resend().await.unwrap_err();
    assert_eq!(err, StorefrontError::Auth(AuthError::MissingEmail));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_one_resend_at_a_time() {
    let mock = MockTransport::new();
    let gate = mock.gate(Method::Post, REGISTER).await;
    reply_json(&mock, Method::Post, REGISTER, 200, json!({ "message": "OTP sent" })).await;

    let signup = Arc::new(flow(&mock, &AppState::new(), details()));
    let first = {
        let signup = Arc::clone(&signup);
        tokio::spawn(async move { signup.resend().await })
    };
    mock.wait_for_requests(1).await;
    assert!(signup.is_resending());

    let err = signup.resend().await.unwrap_err();
    assert_eq!(err, StorefrontError::Auth(AuthError::ResendInProgress));

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), RESEND_SUCCEEDED);
    assert!(!signup.is_resending());
    assert_eq!(mock.requests_to(Method::Post, REGISTER).await.len(), 1);
}
