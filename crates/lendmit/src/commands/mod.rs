//! Command dispatch: bridges CLI args -> core synchronizers -> output.

pub mod config_cmd;
pub mod following;
pub mod listings;
pub mod session;

use lendmit_core::{Client, Identity};

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;

/// Everything a backend-bound handler needs.
pub struct Context<'a> {
    pub client: &'a Client,
    pub profile_name: &'a str,
    pub profile: &'a Profile,
    pub global: &'a GlobalOpts,
}

impl Context<'_> {
    /// Sign in with the profile's credentials.
    pub async fn login(&self) -> Result<Identity, CliError> {
        let creds = config::resolve_credentials(self.profile, self.profile_name)?;
        self.client
            .session()
            .login(&creds.email, &creds.password)
            .await
            .map_err(|e| CliError::from(e).into_auth_failure(self.profile_name))
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Login => session::login(ctx).await,
        Command::Signup(args) => session::signup(ctx, args).await,
        Command::Verify(args) => session::verify(ctx, args).await,
        Command::ResendCode(args) => session::resend_code(ctx, args).await,
        Command::Listings(args) => listings::handle(ctx, args).await,
        Command::Follow(args) => following::follow(ctx, args).await,
        Command::Unfollow(args) => following::unfollow(ctx, args).await,
        Command::Followees => following::followees(ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
