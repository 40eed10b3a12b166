//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use doorctl_config::ConfigError;
use doorctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the service at {url}")]
    #[diagnostic(
        code(doorctl::connection_failed),
        help(
            "Check your network connection and the base URL.\n\
             Run with -D to see the request trace."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(doorctl::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    #[error("{message}")]
    #[diagnostic(code(doorctl::service_error), help("Run with -D to see the request trace."))]
    Service { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed")]
    #[diagnostic(
        code(doorctl::auth_failed),
        help(
            "Verify your email and password.\n\
             Store a password with: doorctl --profile {profile} config set-password"
        )
    )]
    AuthFailed { profile: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(doorctl::no_credentials),
        help(
            "Pass --user and --password, set DOORCTL_USERNAME / DOORCTL_PASSWORD,\n\
             or add a [profiles.{profile}] section to the config file."
        )
    )]
    NoCredentials { what: String, profile: String },

    // ── Doors ────────────────────────────────────────────────────────
    #[error("No door named '{name}'")]
    #[diagnostic(
        code(doorctl::not_found),
        help("Run: doorctl list to see available doors (names are case-sensitive)")
    )]
    NotFound { name: String },

    #[error("{message}")]
    #[diagnostic(
        code(doorctl::conflict),
        help("The door state is from the last refresh. Check it with: doorctl state <door>")
    )]
    Conflict { message: String },

    #[error("Command rejected by service: {message}")]
    #[diagnostic(code(doorctl::rejected))]
    Rejected { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(doorctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(doorctl::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("{message}")]
    #[diagnostic(code(doorctl::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a login failure, naming the profile in the help text.
    pub fn from_login(err: CoreError, profile: &str) -> Self {
        match err {
            CoreError::Authentication { .. } => Self::AuthFailed {
                profile: profile.into(),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport(api) => from_transport(api),

            CoreError::Authentication { .. } => CliError::AuthFailed {
                profile: "current".into(),
            },

            CoreError::DeviceNotFound { name } => CliError::NotFound { name },

            err @ (CoreError::AlreadyInState { .. } | CoreError::IllegalTransition { .. }) => {
                CliError::Conflict {
                    message: err.to_string(),
                }
            }

            CoreError::RemoteCommand { message } => CliError::Rejected { message },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

fn from_transport(err: doorctl_api::Error) -> CliError {
    if err.is_timeout() {
        return CliError::Timeout;
    }
    match err {
        doorctl_api::Error::Connect(source) => CliError::ConnectionFailed {
            url: source
                .url()
                .map_or_else(|| "(unknown)".into(), ToString::to_string),
            source: Box::new(source),
        },
        other => CliError::Service {
            message: other.to_string(),
        },
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoUsername { profile } => CliError::NoCredentials {
                what: "username".into(),
                profile,
            },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials {
                what: "password".into(),
                profile,
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
