// Full network status report.

use std::collections::BTreeMap;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::debug;

use crate::model::{
    DeviceSummary, InterfaceSummary, NetworkReport, ReportOptions, TunnelSummary,
};
use crate::monitor::Monitor;

impl Monitor {
    /// Generate the comprehensive network status report.
    ///
    /// Always carries the health overview and device-type/version tallies;
    /// the interface, BFD, and tunnel sections are independently toggled and
    /// serialize as explicit `null` when disabled. Recommendations are
    /// derived from whatever sections were assembled.
    pub async fn network_report(&self, opts: ReportOptions) -> NetworkReport {
        let network_overview = self.health_summary().await;
        let devices = self.devices_or_empty().await;

        let mut device_types: BTreeMap<String, usize> = BTreeMap::new();
        let mut software_versions: BTreeMap<String, usize> = BTreeMap::new();
        for device in &devices {
            *device_types.entry(device.device_type.clone()).or_insert(0) += 1;
            *software_versions.entry(device.version.clone()).or_insert(0) += 1;
        }
        let device_summary = DeviceSummary {
            total_devices: devices.len(),
            device_types,
            software_versions,
        };

        let interface_summary = if opts.include_interfaces {
            let interfaces = self.interfaces_or_empty().await;
            Some(InterfaceSummary {
                total_interfaces: interfaces.len(),
                active_interfaces: interfaces.iter().filter(|i| i.is_admin_up()).count(),
                high_error_interfaces: interfaces
                    .iter()
                    .filter(|i| i.rx_errors > 100 || i.tx_errors > 100)
                    .count(),
            })
        } else {
            None
        };

        let bfd_summary = if opts.include_bfd {
            Some(self.bfd_session_health(false).await)
        } else {
            None
        };

        let tunnel_summary = if opts.include_tunnels {
            Some(self.tunnel_summary(&devices).await)
        } else {
            None
        };

        let mut recommendations = Vec::new();
        if network_overview.devices_down > 0 {
            recommendations
                .push("Some devices are unreachable - check network connectivity".to_owned());
        }
        if interface_summary
            .as_ref()
            .is_some_and(|s| s.high_error_interfaces > 0)
        {
            recommendations
                .push("Some interfaces have high error rates - investigate potential issues".to_owned());
        }
        if bfd_summary.as_ref().is_some_and(|s| s.inactive_sessions > 0) {
            recommendations.push("Some BFD sessions are inactive - verify network paths".to_owned());
        }
        if recommendations.is_empty() {
            recommendations.push("Network appears to be operating normally".to_owned());
        }

        NetworkReport {
            report_timestamp: Utc::now(),
            network_overview,
            device_summary,
            interface_summary,
            bfd_summary,
            tunnel_summary,
            recommendations,
        }
    }

    /// Tunnel roll-up: fan out per device, tally active tunnels. Failed
    /// per-device fetches are skipped.
    async fn tunnel_summary(&self, devices: &[sdmon_api::Device]) -> TunnelSummary {
        let device_ids: Vec<&str> = devices.iter().filter_map(|d| d.device_id.as_deref()).collect();

        let fetches = device_ids
            .iter()
            .map(|id| async move { (*id, self.client.tunnel_statistics(id).await) });
        let results = join_all(fetches).await;

        let mut tunnels = Vec::new();
        for (device_id, result) in results {
            match result {
                Ok(stats) => tunnels.extend(stats),
                Err(e) => debug!(device_id, error = %e, "skipping device without tunnel data"),
            }
        }

        TunnelSummary {
            total_tunnels: tunnels.len(),
            active_tunnels: tunnels.iter().filter(|t| t.is_up()).count(),
        }
    }
}
