// ── Inventory snapshot storage ──

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::model::{Device, GatewayId, Location};

/// One published view of the account's locations and devices.
///
/// Devices keep server order; locations are keyed by gateway id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub locations: BTreeMap<GatewayId, Location>,
    pub devices: Vec<Device>,
}

/// Outcome of the most recent synchronization attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No refresh has succeeded yet; the snapshot is empty.
    #[default]
    Never,
    /// The last refresh succeeded.
    Fresh { at: DateTime<Utc> },
    /// The last refresh failed; the previous snapshot is still served.
    Stale {
        last_success: Option<DateTime<Utc>>,
        failed_at: DateTime<Utc>,
        reason: String,
    },
}

impl SyncStatus {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh { .. })
    }

    /// Time of the last successful refresh, if any.
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Never => None,
            Self::Fresh { at } => Some(*at),
            Self::Stale { last_success, .. } => *last_success,
        }
    }
}

/// Single-writer store for the inventory snapshot.
///
/// Readers get an `Arc<Snapshot>` that stays valid (and unchanged) after
/// later refreshes publish a new one. Subscribers are notified through
/// `watch` channels.
#[derive(Debug)]
pub struct Inventory {
    pub(crate) snapshot: watch::Sender<Arc<Snapshot>>,
    pub(crate) status: watch::Sender<SyncStatus>,
}

impl Inventory {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        let (status, _) = watch::channel(SyncStatus::Never);
        Self { snapshot, status }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.borrow())
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
