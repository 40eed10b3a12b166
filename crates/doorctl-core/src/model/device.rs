// ── Device domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, GatewayId};
use super::state::DoorState;

/// Independent fault flags reported per door.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FaultFlags {
    pub monitor_only: bool,
    pub low_battery: bool,
    pub sensor_error: bool,
    pub open_error: bool,
    pub close_error: bool,
    pub control_disabled: bool,
}

impl FaultFlags {
    /// Machine-line tokens, in fixed order.
    pub const TOKENS: [&'static str; 6] =
        ["Monitor", "LowBat", "SensorErr", "OpenErr", "CloseErr", "Disabled"];

    /// Flags in the same order as [`Self::TOKENS`].
    pub fn as_array(&self) -> [bool; 6] {
        [
            self.monitor_only,
            self.low_battery,
            self.sensor_error,
            self.open_error,
            self.close_error,
            self.control_disabled,
        ]
    }

    /// Tokens for every set flag, in fixed order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        Self::TOKENS
            .into_iter()
            .zip(self.as_array())
            .filter_map(|(token, set)| set.then_some(token))
    }

    pub fn any(&self) -> bool {
        self.as_array().into_iter().any(|set| set)
    }
}

/// Fields the service sends that this client does not interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Passthrough {
    pub gateway: Option<String>,
    pub image_source: Option<String>,
    pub display_state_since: Option<String>,
    pub connect_server_device_id: Option<String>,
    pub toggle_attribute_name: Option<String>,
    pub toggle_attribute_value: Option<String>,
    /// Unknown fields, verbatim.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty", default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One door, reconciled against the location map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub gateway_id: GatewayId,
    pub name: String,
    /// Location display name, or empty when the gateway is unknown.
    pub location: String,
    pub state: DoorState,
    /// Server-supplied state text, or the canonical name of `state`.
    pub state_name: String,
    /// Seconds since the Unix epoch, as sent in `Statesince`.
    pub state_since: Option<i64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub device_type_id: Option<i64>,
    pub error: bool,
    pub error_status: String,
    pub error_message: String,
    pub faults: FaultFlags,
    pub passthrough: Passthrough,
}

impl Device {
    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }
}
