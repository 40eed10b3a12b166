// ── Domain model ──
//
// Canonical types the rest of the crate works with. Wire records from
// `doorctl_api::models` are converted into these in `convert.rs`.

pub mod device;
pub mod ids;
pub mod location;
pub mod state;

pub use device::{Device, FaultFlags, Passthrough};
pub use ids::{DeviceId, GatewayId};
pub use location::Location;
pub use state::{DesiredState, DoorState};
