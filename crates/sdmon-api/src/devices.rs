// Device inventory endpoints.
//
// The device list is typed; monitor/counters/config payloads vary too much
// by controller version to model and are passed through as raw JSON.

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::Device;

impl Client {
    /// List all fabric devices.
    ///
    /// `GET /dataservice/device`
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        debug!("listing fabric devices");
        self.fetch_as("/dataservice/device").await
    }

    /// Device monitoring information, raw.
    ///
    /// `GET /dataservice/device/monitor`
    pub async fn device_monitor(&self) -> Result<Value, Error> {
        self.fetch("/dataservice/device/monitor").await
    }

    /// Device counters and statistics, raw.
    ///
    /// `GET /dataservice/device/counters`
    pub async fn device_counters(&self) -> Result<Value, Error> {
        self.fetch("/dataservice/device/counters").await
    }

    /// Running configuration for a device, raw.
    ///
    /// `GET /dataservice/device/config?deviceId={id}`
    pub async fn device_config(&self, device_id: &str) -> Result<Value, Error> {
        debug!(device_id, "fetching device config");
        self.fetch(&format!("/dataservice/device/config?deviceId={device_id}"))
            .await
    }
}
