//! Account and session handlers: login, signup, verify, resend-code.

use secrecy::SecretString;

use lendmit_core::{Identity, ResendOutcome, SessionState};

use crate::cli::{ResendCodeArgs, SignupArgs, VerifyArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Context;

fn identity_detail(identity: &Identity) -> String {
    let mut lines = vec![format!("ID:    {}", identity.id), format!("Email: {}", identity.email)];
    if identity.first_name.is_some() || identity.last_name.is_some() {
        lines.push(format!("Name:  {}", identity.display_name()));
    }
    lines.join("\n")
}

fn require_email(ctx: &Context<'_>) -> Result<String, CliError> {
    ctx.profile
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "email".into(),
            reason: "an email is required (--email or profile email)".into(),
        })
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub async fn login(ctx: &Context<'_>) -> Result<(), CliError> {
    let identity = ctx.login().await?;
    output::success(ctx.global, &format!("Logged in as {}", identity.email));
    let out = output::render_single(&ctx.global.output, &identity, identity_detail, |i| {
        i.id.clone()
    });
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

pub async fn signup(ctx: &Context<'_>, args: SignupArgs) -> Result<(), CliError> {
    let email = require_email(ctx)?;
    let password = match args.password {
        Some(pw) => SecretString::from(pw),
        None => match config::resolve_password(ctx.profile, ctx.profile_name) {
            Ok(pw) => pw,
            Err(_) => SecretString::from(rpassword::prompt_password("Password: ").map_err(prompt_err)?),
        },
    };

    let session = ctx.client.session();
    let identity = session
        .signup(&args.first_name, &args.last_name, &email, &password)
        .await?;

    if session.state() == SessionState::CodeSent {
        output::success(ctx.global, &format!("Account created; a verification code was sent to {email}"));
    } else {
        output::notice(
            ctx.global,
            &format!(
                "Account created, but the verification code could not be sent.\n  Retry: lendmit resend-code --user {}",
                identity.id
            ),
        );
    }

    let out = output::render_single(&ctx.global.output, &identity, identity_detail, |i| {
        i.id.clone()
    });
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

pub async fn verify(ctx: &Context<'_>, args: VerifyArgs) -> Result<(), CliError> {
    let session = ctx.client.session();
    if session.verify_code(&args.user, args.code.trim()).await? {
        output::success(ctx.global, "Email verified. You can now log in.");
        Ok(())
    } else {
        Err(CliError::CodeRejected {
            message: session
                .status()
                .error
                .unwrap_or_else(|| "Invalid or expired verification code.".into()),
        })
    }
}

pub async fn resend_code(ctx: &Context<'_>, args: ResendCodeArgs) -> Result<(), CliError> {
    let email = require_email(ctx)?;
    let session = ctx.client.session();
    let outcome = session.resend_verification(&args.user, &email).await?;

    let info = session.status().info.unwrap_or_default();
    match outcome {
        ResendOutcome::Sent => output::success(ctx.global, &info),
        ResendOutcome::AlreadyPending => output::notice(ctx.global, &info),
    }
    Ok(())
}
