// ── Location domain type ──

use serde::{Deserialize, Serialize};

use super::ids::GatewayId;

/// A physical site (gateway) grouping one or more doors.
///
/// Replaced wholesale on every refresh; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: GatewayId,
    pub name: String,
    pub connect_server_id: String,
    /// Raw device list string as sent by the service.
    pub device_list: String,
    /// Opaque flag, passed through unmodified.
    pub is_detonator: bool,
}
