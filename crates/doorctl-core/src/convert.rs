// ── Wire → domain reconciliation ──
//
// Two explicit steps: the places envelope becomes a lookup map keyed by
// gateway id, then each device record is resolved against that map.

use std::collections::BTreeMap;

use doorctl_api::{WireDevice, WirePlace};

use crate::model::{Device, DeviceId, DoorState, FaultFlags, GatewayId, Location, Passthrough};

/// Build the location map. A duplicate gateway id keeps the later record.
pub fn build_location_map(places: Vec<WirePlace>) -> BTreeMap<GatewayId, Location> {
    places
        .into_iter()
        .map(|p| {
            let id = GatewayId(p.gateway_id);
            let location = Location {
                id,
                name: p.name.unwrap_or_default(),
                connect_server_id: p.connect_server_id.unwrap_or_default(),
                device_list: p.device_list.unwrap_or_default(),
                is_detonator: p.is_detonator,
            };
            (id, location)
        })
        .collect()
}

/// Resolve every device against `locations`, preserving server order.
pub fn reconcile_devices(
    devices: Vec<WireDevice>,
    locations: &BTreeMap<GatewayId, Location>,
) -> Vec<Device> {
    devices
        .into_iter()
        .map(|d| reconcile_device(d, locations))
        .collect()
}

fn reconcile_device(d: WireDevice, locations: &BTreeMap<GatewayId, Location>) -> Device {
    let gateway_id = GatewayId(d.gateway_id);
    let location = locations
        .get(&gateway_id)
        .map(|l| l.name.clone())
        .unwrap_or_default();

    let state = DoorState::resolve(d.state_name.as_deref(), d.state.as_deref());
    let state_name = match d.state_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => state.name().to_owned(),
    };

    Device {
        id: DeviceId(d.device_id),
        gateway_id,
        name: d.name.unwrap_or_default(),
        location,
        state,
        state_name,
        state_since: d.state_since,
        last_updated: d.last_updated,
        device_type_id: d.device_type_id,
        error: d.error.unwrap_or(false),
        error_status: d.error_status.unwrap_or_default(),
        error_message: d.error_message.unwrap_or_default(),
        faults: FaultFlags {
            monitor_only: d.monitor_only.unwrap_or(false),
            low_battery: d.low_battery.unwrap_or(false),
            sensor_error: d.sensor_error.unwrap_or(false),
            open_error: d.open_error.unwrap_or(false),
            close_error: d.close_error.unwrap_or(false),
            control_disabled: d.disable_control.unwrap_or(false),
        },
        passthrough: Passthrough {
            gateway: d.gateway,
            image_source: d.image_source,
            display_state_since: d.display_state_since,
            connect_server_device_id: d.connect_server_device_id,
            toggle_attribute_name: d.toggle_attribute_name,
            toggle_attribute_value: d.toggle_attribute_value,
            extra: d.extra,
        },
    }
}
