// ── Door controller ──
//
// Name lookup over the cached snapshot and guarded state changes. Guards
// read the last synchronized state only; a violation never reaches the
// network.

use tracing::info;

use crate::error::CoreError;
use crate::model::{Device, DesiredState};
use crate::session::Session;

/// Check that `desired` may be issued to `device` in its current state.
///
/// Open is legal only from Closed, close only from Open. Asking for the
/// state the door is already in is [`CoreError::AlreadyInState`];
/// everything else (moving, stopped, unknown) is
/// [`CoreError::IllegalTransition`].
pub fn guard(device: &Device, desired: DesiredState) -> Result<(), CoreError> {
    if device.state == desired.required() {
        Ok(())
    } else if device.state == desired.target() {
        Err(CoreError::AlreadyInState {
            device: device.name.clone(),
            requested: desired,
            state: device.state,
        })
    } else {
        Err(CoreError::IllegalTransition {
            device: device.name.clone(),
            requested: desired,
            state: device.state,
        })
    }
}

impl Session {
    /// First device in snapshot order whose name matches exactly.
    ///
    /// Names are not unique on the service side; duplicates resolve to
    /// the first one listed.
    pub fn find_by_name(&self, name: &str) -> Result<Device, CoreError> {
        self.snapshot()
            .devices
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| CoreError::DeviceNotFound { name: name.into() })
    }

    /// Open the named door. Returns the device as it was when the
    /// command was sent.
    pub async fn open(&self, name: &str) -> Result<Device, CoreError> {
        let device = self.find_by_name(name)?;
        self.request_state_change(&device, DesiredState::Open).await?;
        Ok(device)
    }

    /// Close the named door. Returns the device as it was when the
    /// command was sent.
    pub async fn close(&self, name: &str) -> Result<Device, CoreError> {
        let device = self.find_by_name(name)?;
        self.request_state_change(&device, DesiredState::Closed)
            .await?;
        Ok(device)
    }

    /// Guard, then send one state-change command for `device`.
    ///
    /// Does not wait for the door to move and does not touch the local
    /// snapshot; refresh to observe the result.
    pub async fn request_state_change(
        &self,
        device: &Device,
        desired: DesiredState,
    ) -> Result<(), CoreError> {
        guard(device, desired)?;
        info!(
            device = %device.name,
            id = %device.id,
            verb = desired.verb(),
            "requesting door state change"
        );
        self.client()
            .set_desired_door_state(device.id.get(), desired.code())
            .await?;
        Ok(())
    }
}
