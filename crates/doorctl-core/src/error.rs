// ── Core error types ──
//
// The failure taxonomy consumers see. Transport failures are carried
// verbatim; command guards and lookups get their own variants. The
// `From<doorctl_api::Error>` impl routes API errors into this set.

use thiserror::Error;

use crate::model::{DesiredState, DoorState};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    /// Any transport or protocol failure, not retried.
    #[error(transparent)]
    Transport(doorctl_api::Error),

    /// Login rejected or failed. The message is deliberately generic.
    #[error("{message}")]
    Authentication { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("no device named {name}")]
    DeviceNotFound { name: String },

    // ── Command guards ───────────────────────────────────────────────
    #[error("Can't {}, door '{device}' is already {}", .requested.verb(), .state.as_lower())]
    AlreadyInState {
        device: String,
        requested: DesiredState,
        state: DoorState,
    },

    #[error("Can't {}, door '{device}' is {}", .requested.verb(), .state.as_lower())]
    IllegalTransition {
        device: String,
        requested: DesiredState,
        state: DoorState,
    },

    /// The service accepted the request but reported an error.
    #[error("Command rejected by service: {message}")]
    RemoteCommand { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for guard violations, which never reach the network.
    pub fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInState { .. } | Self::IllegalTransition { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<doorctl_api::Error> for CoreError {
    fn from(err: doorctl_api::Error) -> Self {
        match err {
            doorctl_api::Error::Authentication { message } => {
                CoreError::Authentication { message }
            }
            doorctl_api::Error::RemoteCommand { message } => CoreError::RemoteCommand { message },
            other => CoreError::Transport(other),
        }
    }
}
