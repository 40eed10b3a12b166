// ── Inventory store ──
//
// Holds the last successful snapshot of locations and devices plus the
// synchronization status. Snapshots are replaced wholesale, never edited.

mod inventory;
mod refresh;

pub use inventory::{Inventory, Snapshot, SyncStatus};
