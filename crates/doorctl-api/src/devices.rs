// Device endpoints
//
// Device inventory via GetAllDevices (read) and state changes via
// TriggerStateChange (command).

use tracing::debug;

use crate::client::ServiceClient;
use crate::error::Error;
use crate::models::{TriggerStateChangeResponse, WireDevice};

const DEVICES_PATH: &str = "api/MyQDevices/GetAllDevices";
const TRIGGER_PATH: &str = "Device/TriggerStateChange";

/// Attribute name for door open/close commands.
pub const DESIRED_DOOR_STATE: &str = "desireddoorstate";

impl ServiceClient {
    /// List all devices on the account, in server order.
    ///
    /// `GET {base}api/MyQDevices/GetAllDevices?culture=..&brandName=..`
    pub async fn list_devices(&self, culture: &str, brand: &str) -> Result<Vec<WireDevice>, Error> {
        let url = self.endpoint(DEVICES_PATH)?;
        debug!(culture, brand, "listing devices");
        self.get_json(url, &[("culture", culture), ("brandName", brand)])
            .await
    }

    /// Ask the service to drive a door towards `attribute_value`
    /// (`1` open, `0` closed).
    ///
    /// `POST {base}Device/TriggerStateChange`. A non-empty `errormessage`
    /// in the reply fails the call even though the HTTP exchange succeeded.
    /// The call does not wait for the door to move.
    pub async fn set_desired_door_state(
        &self,
        device_id: i64,
        attribute_value: u8,
    ) -> Result<(), Error> {
        let url = self.endpoint(TRIGGER_PATH)?;
        let device_id = device_id.to_string();
        let value = attribute_value.to_string();
        debug!(%device_id, %value, "triggering door state change");

        let resp: TriggerStateChangeResponse = self
            .post_form_json(
                url,
                &[
                    ("myQDeviceId", device_id.as_str()),
                    ("attributename", DESIRED_DOOR_STATE),
                    ("attributevalue", value.as_str()),
                ],
            )
            .await?;

        match resp.errormessage {
            Some(message) if !message.is_empty() => Err(Error::RemoteCommand { message }),
            _ => Ok(()),
        }
    }
}
