// ── Authenticated session ──
//
// Owns the cookie-bearing client, the fixed session configuration and
// the inventory. Every operation awaits one request at a time.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use doorctl_api::{ServiceClient, TransportConfig};

use crate::config::SessionConfig;
use crate::convert::{build_location_map, reconcile_devices};
use crate::error::CoreError;
use crate::model::{Device, DoorState, Location};
use crate::store::{Inventory, Snapshot, SyncStatus};

/// One authenticated conversation with the service.
///
/// Configuration is fixed at construction. Only the inventory (via the
/// refresh methods) and the cookie jar change afterwards.
pub struct Session {
    client: ServiceClient,
    config: SessionConfig,
    inventory: Inventory,
}

impl Session {
    /// Build an unauthenticated session with a fresh cookie jar.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default()
            .with_timeout(config.timeout)
            .with_cookie_jar();
        let client = ServiceClient::new(config.base_url.clone(), &transport)?;
        Ok(Self {
            client,
            config,
            inventory: Inventory::new(),
        })
    }

    /// Create a session and log in.
    ///
    /// Any failure during login surfaces as [`CoreError::Authentication`]
    /// with a generic message. The cause is only logged.
    pub async fn authenticate(
        config: SessionConfig,
        username: &str,
        password: &SecretString,
    ) -> Result<Self, CoreError> {
        let session = Self::new(config)?;
        session.client.login(username, password).await?;
        info!(base_url = %session.config.base_url, "authenticated");
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // ── Synchronization ──────────────────────────────────────────────

    /// Fetch the places list and replace the location map.
    pub async fn refresh_locations(&self) -> Result<(), CoreError> {
        let places = match self.client.list_places().await {
            Ok(places) => places,
            Err(e) => return Err(self.sync_failed(e.into())),
        };
        self.inventory.apply_locations(build_location_map(places));
        Ok(())
    }

    /// Fetch locations and devices, then publish both in one snapshot.
    ///
    /// Devices are resolved against the freshly fetched location map.
    /// Nothing is published unless both requests succeed. On failure the
    /// previous snapshot stays in place and the sync status turns
    /// [`SyncStatus::Stale`].
    pub async fn refresh_devices(&self) -> Result<(), CoreError> {
        let places = match self.client.list_places().await {
            Ok(places) => places,
            Err(e) => return Err(self.sync_failed(e.into())),
        };

        let wire = match self
            .client
            .list_devices(&self.config.culture, &self.config.brand)
            .await
        {
            Ok(wire) => wire,
            Err(e) => return Err(self.sync_failed(e.into())),
        };

        let locations = build_location_map(places);
        let devices = reconcile_devices(wire, &locations);
        debug!(
            locations = locations.len(),
            devices = devices.len(),
            "inventory reconciled"
        );
        self.inventory.apply_snapshot(locations, devices);
        self.inventory.record_success();
        Ok(())
    }

    /// Full synchronization: locations then devices. Stops at the first
    /// failure.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.refresh_devices().await
    }

    fn sync_failed(&self, err: CoreError) -> CoreError {
        warn!(error = %err, "inventory refresh failed, keeping previous snapshot");
        self.inventory.record_failure(&err);
        err
    }

    // ── Snapshot queries ─────────────────────────────────────────────

    /// The current inventory snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inventory.snapshot()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.inventory.sync_status()
    }

    /// All devices, in server order.
    pub fn devices(&self) -> Vec<Device> {
        self.snapshot().devices.clone()
    }

    /// All locations, by ascending gateway id.
    pub fn locations(&self) -> Vec<Location> {
        self.snapshot().locations.values().cloned().collect()
    }

    /// Devices whose resolved state is `state`, in server order.
    pub fn devices_in_state(&self, state: DoorState) -> Vec<Device> {
        self.snapshot()
            .devices
            .iter()
            .filter(|d| d.state == state)
            .cloned()
            .collect()
    }
}
