// Device filtering and alert extraction.

use serde_json::Value;

use sdmon_api::Device;

use crate::model::{AlertSet, AlertSeverity, DeviceAlert, FilterResult, StatusFilter};
use crate::monitor::Monitor;

impl Monitor {
    /// Filter the device list by operational status.
    ///
    /// `up`/`down` match the reachability field; `normal` matches the status
    /// field exactly; `critical`/`warning` match it as a substring. A filter
    /// nothing matches yields an empty set, not an error.
    pub async fn filter_devices(&self, status: StatusFilter) -> FilterResult {
        let devices = self.devices_or_empty().await;
        let total_devices = devices.len();

        let filtered: Vec<Device> = devices
            .into_iter()
            .filter(|d| matches_filter(d, status))
            .collect();

        FilterResult {
            filter_criteria: status,
            total_devices,
            filtered_count: filtered.len(),
            devices: filtered,
        }
    }

    /// Extract device alerts, optionally filtered by severity.
    ///
    /// Unreachable devices raise a critical alert; any non-"normal" status
    /// raises warning (status contains "warning") or info. Per-severity
    /// tallies count the *filtered* set, so `total_alerts` always equals
    /// the number of alerts returned.
    pub async fn device_alerts(&self, severity: AlertSeverity) -> AlertSet {
        let devices = self.devices_or_empty().await;

        let mut set = AlertSet {
            severity_filter: severity,
            total_alerts: 0,
            critical_alerts: 0,
            warning_alerts: 0,
            info_alerts: 0,
            alerts: Vec::new(),
        };

        for device in &devices {
            let timestamp = device
                .lastupdated
                .clone()
                .unwrap_or_else(|| Value::String("unknown".into()));

            if device.reachability == "unreachable"
                && matches!(severity, AlertSeverity::All | AlertSeverity::Critical)
            {
                set.alerts.push(DeviceAlert {
                    device_id: device.device_id_or_unknown(),
                    hostname: device.hostname.clone(),
                    severity: AlertSeverity::Critical,
                    message: "Device is unreachable".into(),
                    timestamp: timestamp.clone(),
                });
                set.critical_alerts += 1;
            }

            if device.status != "normal" {
                let alert_severity = if device.status.to_lowercase().contains("warning") {
                    AlertSeverity::Warning
                } else {
                    AlertSeverity::Info
                };

                if severity == AlertSeverity::All || severity == alert_severity {
                    set.alerts.push(DeviceAlert {
                        device_id: device.device_id_or_unknown(),
                        hostname: device.hostname.clone(),
                        severity: alert_severity,
                        message: format!("Device status: {}", device.status),
                        timestamp,
                    });
                    if alert_severity == AlertSeverity::Warning {
                        set.warning_alerts += 1;
                    } else {
                        set.info_alerts += 1;
                    }
                }
            }
        }

        set.total_alerts = set.alerts.len();
        set
    }
}

fn matches_filter(device: &Device, filter: StatusFilter) -> bool {
    let reachability = device.reachability.to_lowercase();
    let status = device.status.to_lowercase();
    match filter {
        StatusFilter::Up => reachability == "reachable",
        StatusFilter::Down => reachability == "unreachable",
        StatusFilter::Normal => status == "normal",
        StatusFilter::Critical => status.contains("critical"),
        StatusFilter::Warning => status.contains("warning"),
    }
}
