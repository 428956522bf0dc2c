//! Signup OTP commands.

use anyhow::{bail, Result};
use atelier_auth::RegistrationDetails;
use atelier_storefront::signup::SIGNUP_SUCCEEDED;
use atelier_storefront::SignupFlow;
use chrono::Utc;
use serde_json::json;

use super::{SignupArgs, SignupCommand};
use crate::context::Context;

/// Run the signup command.
pub async fn run(args: SignupArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SignupCommand::Verify { email, otp } => verify(email, &otp, ctx).await,
        SignupCommand::Resend {
            email,
            name,
            phone,
            password,
        } => {
            let mut details = RegistrationDetails::new(email);
            details.name = name;
            details.phone = phone;
            details.password = password;
            resend(details, ctx).await
        }
    }
}

async fn verify(email: String, otp: &str, ctx: &Context) -> Result<()> {
    let state = ctx.state(None, None);
    let mut flow = SignupFlow::new(
        ctx.api()?,
        state,
        RegistrationDetails::new(email),
        &ctx.config.otp,
        Utc::now(),
    );
    if !flow.otp_mut().paste(otp) {
        bail!("The OTP must be exactly {} digits", flow.otp().len());
    }

    let spinner = ctx.output.spinner("Verifying...");
    let session = flow.verify().await;
    spinner.finish_and_clear();
    let session = session?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "userId": session.user_id,
            "coupon": session.coupon,
        }));
        return Ok(());
    }

    ctx.output.success(SIGNUP_SUCCEEDED);
    ctx.output.kv("User", session.user_id.as_str());
    if let Some(coupon) = &session.coupon {
        ctx.output.kv("Welcome coupon", coupon);
    }
    Ok(())
}

async fn resend(details: RegistrationDetails, ctx: &Context) -> Result<()> {
    let flow = SignupFlow::new(
        ctx.api()?,
        ctx.state(None, None),
        details,
        &ctx.config.otp,
        Utc::now(),
    );

    let spinner = ctx.output.spinner("Requesting a new code...");
    let message = flow.resend().await;
    spinner.finish_and_clear();
    let message = message?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "message": message,
            "resendIn": flow.countdown_display(Utc::now()),
        }));
        return Ok(());
    }

    ctx.output.success(message);
    ctx.output.kv("Resend available in", &flow.countdown_display(Utc::now()));
    Ok(())
}
