// ── Door state types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Last-known physical state of a door, as reported by the service.
///
/// Decoded from free text (or a legacy numeric code) into a closed set.
/// Anything unrecognized, including an empty string, is `Unknown`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum DoorState {
    Open,
    Closed,
    Opening,
    Closing,
    Stopped,
    Unknown,
}

impl DoorState {
    /// Map the service's numeric current-state code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Open,
            2 => Self::Closed,
            3 => Self::Stopped,
            4 => Self::Opening,
            5 => Self::Closing,
            _ => Self::Unknown,
        }
    }

    /// Resolve a state from the `StateName` and `State` wire fields.
    ///
    /// `StateName` text wins, then `State` as text, then `State` as a
    /// numeric code.
    pub fn resolve(state_name: Option<&str>, state: Option<&str>) -> Self {
        let named = |raw: Option<&str>| {
            raw.map(str::trim)
                .filter(|s| !s.is_empty())
                .and_then(|s| s.parse::<Self>().ok())
                .filter(|s| *s != Self::Unknown)
        };

        named(state_name)
            .or_else(|| named(state))
            .or_else(|| {
                state
                    .and_then(|s| s.trim().parse::<i64>().ok())
                    .map(Self::from_code)
            })
            .unwrap_or(Self::Unknown)
    }

    /// Canonical display name (`"Open"`, `"Unknown"`, ...).
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Lower-case name, for messages.
    pub fn as_lower(self) -> String {
        self.name().to_ascii_lowercase()
    }

    /// Moving states: the actuator is busy.
    pub fn is_transitional(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Two-valued command sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesiredState {
    Open,
    Closed,
}

impl DesiredState {
    /// Wire code for the `attributevalue` form field.
    pub fn code(self) -> u8 {
        match self {
            Self::Open => 1,
            Self::Closed => 0,
        }
    }

    /// Verb used in messages ("open" / "close").
    pub fn verb(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "close",
        }
    }

    /// The door state this command drives towards.
    pub fn target(self) -> DoorState {
        match self {
            Self::Open => DoorState::Open,
            Self::Closed => DoorState::Closed,
        }
    }

    /// The only state this command may be issued from.
    pub fn required(self) -> DoorState {
        match self {
            Self::Open => DoorState::Closed,
            Self::Closed => DoorState::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_state_name() {
        assert_eq!(
            DoorState::resolve(Some("Opening"), Some("2")),
            DoorState::Opening
        );
    }

    #[test]
    fn resolve_reads_text_in_state_field() {
        assert_eq!(DoorState::resolve(None, Some("Closed")), DoorState::Closed);
        assert_eq!(DoorState::resolve(Some(""), Some("Open")), DoorState::Open);
    }

    #[test]
    fn state_text_is_case_sensitive() {
        assert_eq!(DoorState::resolve(Some("open"), None), DoorState::Unknown);
        assert_eq!(DoorState::resolve(None, Some("CLOSED")), DoorState::Unknown);
        // A numeric code still decides when the text doesn't match exactly.
        assert_eq!(DoorState::resolve(Some("closed"), Some("2")), DoorState::Closed);
    }

    #[test]
    fn resolve_falls_back_to_numeric_code() {
        assert_eq!(DoorState::resolve(Some(""), Some("1")), DoorState::Open);
        assert_eq!(DoorState::resolve(None, Some("2")), DoorState::Closed);
        assert_eq!(DoorState::resolve(None, Some("3")), DoorState::Stopped);
        assert_eq!(DoorState::resolve(None, Some("4")), DoorState::Opening);
        assert_eq!(DoorState::resolve(None, Some("5")), DoorState::Closing);
        assert_eq!(DoorState::resolve(None, Some("9")), DoorState::Unknown);
    }

    #[test]
    fn resolve_empty_is_unknown() {
        assert_eq!(DoorState::resolve(Some(""), Some("")), DoorState::Unknown);
        assert_eq!(DoorState::resolve(None, None), DoorState::Unknown);
        assert_eq!(
            DoorState::resolve(Some("Ajar"), Some("sideways")),
            DoorState::Unknown
        );
    }

    #[test]
    fn names() {
        assert_eq!(DoorState::Closing.name(), "Closing");
        assert_eq!(DoorState::Closing.to_string(), "Closing");
        assert_eq!(DoorState::Stopped.as_lower(), "stopped");
    }

    #[test]
    fn desired_state_codes() {
        assert_eq!(DesiredState::Open.code(), 1);
        assert_eq!(DesiredState::Closed.code(), 0);
        assert_eq!(DesiredState::Closed.verb(), "close");
        assert_eq!(DesiredState::Open.required(), DoorState::Closed);
        assert_eq!(DesiredState::Closed.target(), DoorState::Closed);
    }
}
