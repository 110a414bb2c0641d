//! Profile resolution and CLI-flag overrides on top of `lendmit-config`.
//!
//! Core never sees these types; it receives a pre-built `ClientConfig`.

use secrecy::SecretString;

use lendmit_core::{ClientConfig, DEFAULT_BASE_URL};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use lendmit_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_client_config,
    resolve_password, save_config, store_password,
};

/// Email and password for signing in.
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Determine the active profile name: `--profile` flag, then the
/// config's `default_profile`, then `"default"`.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Look up the active profile and apply CLI flag overrides.
///
/// A profile named explicitly with `--profile` must exist. Without one,
/// a missing profile falls back to the local backend defaults.
pub fn resolve_profile(global: &GlobalOpts, cfg: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::new(DEFAULT_BASE_URL),
    };

    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if let Some(ref email) = global.email {
        profile.email = Some(email.clone());
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    Ok((name, profile))
}

/// Build the core `ClientConfig` for the active profile.
pub fn client_config(global: &GlobalOpts) -> Result<(String, Profile, ClientConfig), CliError> {
    let cfg = load_config_or_default();
    let (name, profile) = resolve_profile(global, &cfg)?;
    let config = profile_to_client_config(&profile)?;
    Ok((name, profile, config))
}

/// Email from the profile or flags, password through the credential chain.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, CliError> {
    let email = profile
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = resolve_password(profile, profile_name)?;
    Ok(Credentials { email, password })
}
