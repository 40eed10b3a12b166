// Gateway (location) endpoints
//
// The places list is the only read on gateways. It takes a single
// cache-busting parameter: the current time in milliseconds.

use chrono::Utc;
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::Error;
use crate::models::{PlaceList, WirePlace};

const GATEWAYS_PATH: &str = "Gateway/GetAllGateways";

impl ServiceClient {
    /// List every gateway registered to the account, in server order.
    ///
    /// `GET {base}Gateway/GetAllGateways?_={unix millis}`
    pub async fn list_places(&self) -> Result<Vec<WirePlace>, Error> {
        let url = self.endpoint(GATEWAYS_PATH)?;
        let cache_buster = Utc::now().timestamp_millis().to_string();
        debug!("listing gateways");
        let list: PlaceList = self.get_json(url, &[("_", &cache_buster)]).await?;
        Ok(list.places)
    }
}
