// ── Monitor facade ──
//
// Aggregation operations over the controller API, one file per concern:
// health, devices (filter/alerts), interfaces (ranking/utilization), bfd,
// topology, report. All operations are inherent methods on `Monitor`.

use std::sync::Arc;

use tracing::warn;

use sdmon_api::{Client, Device, InterfaceStat};

mod bfd;
mod devices;
mod health;
mod interfaces;
mod report;
mod topology;

/// Aggregation engine over a shared controller client.
///
/// Holds no state of its own -- session handling lives inside the client,
/// and every operation recomputes from a fresh snapshot.
#[derive(Clone)]
pub struct Monitor {
    client: Arc<Client>,
}

impl Monitor {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// The underlying API client (for raw passthrough calls).
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Device list, degraded to empty on upstream failure.
    pub(crate) async fn devices_or_empty(&self) -> Vec<Device> {
        match self.client.list_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "device list fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Interface statistics, degraded to empty on upstream failure.
    pub(crate) async fn interfaces_or_empty(&self) -> Vec<InterfaceStat> {
        match self.client.interface_statistics().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "interface statistics fetch failed, treating as empty");
                Vec::new()
            }
        }
    }
}
