// BFD (Bidirectional Forwarding Detection) endpoints.

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::BfdSession;

impl Client {
    /// BFD state summary for a device, raw.
    ///
    /// `GET /dataservice/device/bfd/state/device?deviceId={id}`
    pub async fn bfd_state(&self, device_id: &str) -> Result<Value, Error> {
        debug!(device_id, "fetching BFD state");
        self.fetch(&format!(
            "/dataservice/device/bfd/state/device?deviceId={device_id}"
        ))
        .await
    }

    /// BFD sessions for a device.
    ///
    /// `GET /dataservice/device/bfd/sessions?deviceId={id}`
    pub async fn bfd_sessions(&self, device_id: &str) -> Result<Vec<BfdSession>, Error> {
        debug!(device_id, "fetching BFD sessions");
        self.fetch_as(&format!(
            "/dataservice/device/bfd/sessions?deviceId={device_id}"
        ))
        .await
    }
}
