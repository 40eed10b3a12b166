//! Configuration for doorctl.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `doorctl_core::SessionConfig`. The CLI layers its
//! flag overrides on top of these.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use doorctl_core::SessionConfig;

/// Prefix for every environment variable the tool reads.
pub const ENV_PREFIX: &str = "DOORCTL_";

/// Environment variable holding the account email.
pub const USERNAME_ENV: &str = "DOORCTL_USERNAME";

/// Environment variable holding the account password.
pub const PASSWORD_ENV: &str = "DOORCTL_PASSWORD";

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "doorctl";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no username configured for profile '{profile}'")]
    NoUsername { profile: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format: `human`, `machine`, `json`, `yaml`, or `table`.
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "human".into()
}
fn default_timeout() -> u64 {
    60
}

/// A named account profile. Every field is optional; missing values
/// fall back to env vars, the keyring, or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Account email.
    pub username: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Service base URL override.
    pub base_url: Option<String>,

    /// `culture` override for device listing.
    pub culture: Option<String>,

    /// `brandName` override for device listing.
    pub brand: Option<String>,

    /// Per-profile timeout override, in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "doorctl", "doorctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("doorctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an error.
///
/// Env keys nest on `__`, so `DOORCTL_DEFAULT_PROFILE` sets
/// `default_profile` and `DOORCTL_DEFAULTS__OUTPUT` sets `defaults.output`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the account email: `DOORCTL_USERNAME`, then the profile.
pub fn resolve_username(
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<String, ConfigError> {
    resolve_username_with(profile, profile_name, |k| std::env::var(k).ok())
}

/// [`resolve_username`] with an injectable env lookup.
pub fn resolve_username_with(
    profile: Option<&Profile>,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    env(USERNAME_ENV)
        .filter(|u| !u.is_empty())
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .ok_or_else(|| ConfigError::NoUsername {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain (no CLI flag step).
///
/// Order: `DOORCTL_PASSWORD`, the profile's `password_env`, the system
/// keyring, then plaintext `password` in the profile.
pub fn resolve_password(
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_password_with(
        profile,
        profile_name,
        |k| std::env::var(k).ok(),
        keyring_password,
    )
}

/// [`resolve_password`] with injectable env and keyring lookups.
pub fn resolve_password_with(
    profile: Option<&Profile>,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Tool-wide env var
    if let Some(pw) = env(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Profile's password_env → env var lookup
    if let Some(env_name) = profile.and_then(|p| p.password_env.as_deref()) {
        if let Some(pw) = env(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. System keyring
    if let Some(pw) = keyring(profile_name) {
        return Ok(SecretString::from(pw));
    }

    // 4. Plaintext in config
    if let Some(pw) = profile.and_then(|p| p.password.clone()) {
        return Ok(SecretString::from(pw));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Password stored in the system keyring for `profile_name`, if any.
pub fn keyring_password(profile_name: &str) -> Option<String> {
    let entry = keyring_entry(profile_name).ok()?;
    match entry.get_password() {
        Ok(pw) => Some(pw),
        Err(e) => {
            debug!(profile = profile_name, error = %e, "no keyring password");
            None
        }
    }
}

/// Store `password` in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(password.expose_secret())
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Session config ──────────────────────────────────────────────────

/// Build a `SessionConfig` from an optional profile and the defaults.
///
/// Missing profile values fall back to the built-in service defaults.
pub fn profile_to_session_config(
    profile: Option<&Profile>,
    defaults: &Defaults,
) -> Result<SessionConfig, ConfigError> {
    let mut cfg = match profile.and_then(|p| p.base_url.as_deref()) {
        Some(raw) => SessionConfig::with_base_url(raw).map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?,
        None => SessionConfig::default(),
    };

    if let Some(p) = profile {
        if let Some(ref culture) = p.culture {
            cfg.culture.clone_from(culture);
        }
        if let Some(ref brand) = p.brand {
            cfg.brand.clone_from(brand);
        }
    }

    let secs = profile
        .and_then(|p| p.timeout)
        .unwrap_or(defaults.timeout);
    cfg.timeout = Duration::from_secs(secs);
    Ok(cfg)
}
