// ── Snapshot replacement ──
//
// Each apply_* call publishes a whole new snapshot. Nothing is written
// until the caller has a fully reconciled collection in hand.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::inventory::{Inventory, Snapshot, SyncStatus};
use crate::model::{Device, GatewayId, Location};

impl Inventory {
    /// Replace the location map, keeping the current devices.
    pub(crate) fn apply_locations(&self, locations: BTreeMap<GatewayId, Location>) {
        debug!(count = locations.len(), "publishing locations");
        self.snapshot.send_modify(|current| {
            *current = Arc::new(Snapshot {
                locations,
                devices: current.devices.clone(),
            });
        });
    }

    /// Replace locations and devices together.
    pub(crate) fn apply_snapshot(
        &self,
        locations: BTreeMap<GatewayId, Location>,
        devices: Vec<Device>,
    ) {
        debug!(
            locations = locations.len(),
            devices = devices.len(),
            "publishing snapshot"
        );
        self.snapshot
            .send_replace(Arc::new(Snapshot { locations, devices }));
    }

    pub(crate) fn record_success(&self) {
        self.status.send_replace(SyncStatus::Fresh { at: Utc::now() });
    }

    pub(crate) fn record_failure(&self, reason: &impl ToString) {
        let last_success = self.status.borrow().last_success();
        self.status.send_replace(SyncStatus::Stale {
            last_success,
            failed_at: Utc::now(),
            reason: reason.to_string(),
        });
    }
}
