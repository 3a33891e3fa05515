// Tunnel statistics endpoint.

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::TunnelStat;

impl Client {
    /// Tunnel statistics for a device.
    ///
    /// `GET /dataservice/device/tunnel/statistics?deviceId={id}`
    pub async fn tunnel_statistics(&self, device_id: &str) -> Result<Vec<TunnelStat>, Error> {
        debug!(device_id, "fetching tunnel statistics");
        self.fetch_as(&format!(
            "/dataservice/device/tunnel/statistics?deviceId={device_id}"
        ))
        .await
    }
}
