// Wire types
//
// Models for the service's JSON payloads. Field names and casing are the
// wire contract and are spelled out explicitly. Fields use
// `#[serde(default)]` liberally because records omit fields freely.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ── Locations ────────────────────────────────────────────────────────

/// Envelope returned by `Gateway/GetAllGateways`.
///
/// ```json
/// { "Placeslist": [ { "GatewayId": 1, "Name": "Home", ... } ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct PlaceList {
    #[serde(rename = "Placeslist", default)]
    pub places: Vec<WirePlace>,
}

/// One gateway record from the places envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePlace {
    #[serde(rename = "GatewayId")]
    pub gateway_id: i64,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "ConnectServerId", default)]
    pub connect_server_id: Option<String>,
    #[serde(rename = "DeviceList", default)]
    pub device_list: Option<String>,
    #[serde(rename = "IsDetonator", default)]
    pub is_detonator: bool,
}

// ── Devices ──────────────────────────────────────────────────────────

/// One device record from `api/MyQDevices/GetAllDevices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct WireDevice {
    #[serde(rename = "GatewayId", default)]
    pub gateway_id: i64,
    #[serde(rename = "ErrorStatus", default)]
    pub error_status: Option<String>,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<String>,
    #[serde(
        rename = "LastUpdatedDateTime",
        default,
        deserialize_with = "lenient_datetime"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(rename = "MyQDeviceId", default)]
    pub device_id: i64,
    #[serde(rename = "Statesince", default)]
    pub state_since: Option<i64>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "State", default)]
    pub state: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<bool>,
    #[serde(rename = "MonitorOnly", default)]
    pub monitor_only: Option<bool>,
    #[serde(rename = "LowBattery", default)]
    pub low_battery: Option<bool>,
    #[serde(rename = "SensorError", default)]
    pub sensor_error: Option<bool>,
    #[serde(rename = "OpenError", default)]
    pub open_error: Option<bool>,
    #[serde(rename = "CloseError", default)]
    pub close_error: Option<bool>,
    #[serde(rename = "DisableControl", default)]
    pub disable_control: Option<bool>,
    #[serde(rename = "StateName", default)]
    pub state_name: Option<String>,
    #[serde(rename = "DeviceTypeId", default)]
    pub device_type_id: Option<i64>,

    // Passed through unmodified.
    #[serde(rename = "Gateway", default)]
    pub gateway: Option<String>,
    #[serde(rename = "Imagesource", default)]
    pub image_source: Option<String>,
    #[serde(rename = "DisplayStatesince", default)]
    pub display_state_since: Option<String>,
    #[serde(rename = "ConnectServerDeviceId", default)]
    pub connect_server_device_id: Option<String>,
    #[serde(rename = "ToggleAttributeName", default)]
    pub toggle_attribute_name: Option<String>,
    #[serde(rename = "ToggleAttributeValue", default)]
    pub toggle_attribute_value: Option<String>,

    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Commands ─────────────────────────────────────────────────────────

/// Response of `Device/TriggerStateChange`. An empty or missing
/// `errormessage` means the command was accepted.
#[derive(Debug, Default, Deserialize)]
pub struct TriggerStateChangeResponse {
    #[serde(default)]
    pub errormessage: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Accept RFC 3339 timestamps, or naive ones taken as UTC. Anything
/// else (`null`, numbers, objects, unparseable text) decodes as "no
/// timestamp".
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
