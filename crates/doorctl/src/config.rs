//! CLI configuration -- thin wrapper around `doorctl_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--user, --password, --base-url, --timeout, --output).

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use doorctl_core::SessionConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use doorctl_config::{Config, config_path, load_config_or_default};

/// Everything needed to open a session.
pub struct SessionPlan {
    pub profile: String,
    pub config: SessionConfig,
    pub username: String,
    pub password: SecretString,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Combine config file, environment and flags into a session plan.
///
/// A profile named with `--profile` must exist. Without one, flags and
/// env vars alone are enough.
pub fn resolve_session(global: &GlobalOpts, cfg: &Config) -> Result<SessionPlan, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profile(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        return Err(profile_not_found(&profile_name, cfg));
    }

    // 1. Endpoint and timeouts (flag > profile > defaults)
    let mut session = doorctl_config::profile_to_session_config(profile, &cfg.defaults)?;
    if let Some(ref raw) = global.base_url {
        session.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(secs) = global.timeout {
        session.timeout = Duration::from_secs(secs);
    }

    // 2. Credentials (flag > env > profile chain)
    let username = match global.user {
        Some(ref user) => user.clone(),
        None => doorctl_config::resolve_username(profile, &profile_name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => doorctl_config::resolve_password(profile, &profile_name)?,
    };

    Ok(SessionPlan {
        profile: profile_name,
        config: session,
        username,
        password,
    })
}

/// Pick the output format: `-M`, then `--output`, then the config default.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if global.machine {
        return Ok(OutputFormat::Machine);
    }
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&cfg.defaults.output, true).map_err(|_| CliError::Validation {
        field: "defaults.output".into(),
        reason: format!(
            "unknown output format '{}', expected human, machine, table, json or yaml",
            cfg.defaults.output
        ),
    })
}

pub fn profile_not_found(name: &str, cfg: &Config) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
        path: config_path().display().to_string(),
    }
}
