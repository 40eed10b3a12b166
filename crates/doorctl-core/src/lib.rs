// doorctl-core: Session, inventory synchronization and guarded door control.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod present;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::guard;
pub use config::{DEFAULT_BRAND, DEFAULT_CULTURE, SessionConfig};
pub use error::CoreError;
pub use present::{LineStyle, Render};
pub use session::Session;
pub use store::{Inventory, Snapshot, SyncStatus};

pub use model::{
    DesiredState, Device, DeviceId, DoorState, FaultFlags, GatewayId, Location, Passthrough,
};
