// Interface traffic ranking and utilization monitoring.

use sdmon_api::InterfaceStat;

use crate::model::{HotInterface, InterfaceTraffic, TopInterfacesResult, TrafficMetric, UtilizationReport};
use crate::monitor::Monitor;

impl Monitor {
    /// Top interfaces ranked by a traffic metric, descending.
    ///
    /// The sort is stable, so interfaces with equal counters keep their
    /// controller-reported order. A limit beyond the available count returns
    /// everything.
    pub async fn top_interfaces(&self, limit: usize, metric: TrafficMetric) -> TopInterfacesResult {
        let stats = self.interfaces_or_empty().await;
        let total_interfaces = stats.len();

        let mut top_interfaces: Vec<InterfaceTraffic> = stats.iter().map(traffic_entry).collect();
        top_interfaces.sort_by(|a, b| b.metric_value(metric).cmp(&a.metric_value(metric)));
        top_interfaces.truncate(limit);

        TopInterfacesResult {
            metric,
            limit,
            total_interfaces,
            top_interfaces,
        }
    }

    /// Flag interfaces whose utilization exceeds `threshold` (percent) and
    /// report the mean over all interfaces.
    ///
    /// The utilization figure is the source system's placeholder metric --
    /// byte volume scaled and wrapped into a percentage -- kept verbatim for
    /// compatibility. It is not a bandwidth-aware computation.
    pub async fn interface_utilization(&self, threshold: f64) -> UtilizationReport {
        let stats = self.interfaces_or_empty().await;

        let mut report = UtilizationReport {
            threshold_percent: threshold,
            total_interfaces: stats.len(),
            high_utilization_interfaces: 0,
            interfaces_over_threshold: Vec::new(),
            average_utilization: 0.0,
        };

        let mut total_utilization = 0.0;
        for stat in &stats {
            let utilization = utilization_percent(stat.rx_bytes, stat.tx_bytes);
            total_utilization += utilization;

            if utilization > threshold {
                report.high_utilization_interfaces += 1;
                report.interfaces_over_threshold.push(HotInterface {
                    device_id: stat.device_id.clone().unwrap_or_else(|| "unknown".into()),
                    interface: stat.interface_name.clone(),
                    utilization_percent: round2(utilization),
                    rx_bytes: stat.rx_bytes,
                    tx_bytes: stat.tx_bytes,
                    status: stat.admin_status.clone(),
                });
            }
        }

        if !stats.is_empty() {
            report.average_utilization = round2(total_utilization / stats.len() as f64);
        }
        report
    }
}

fn traffic_entry(stat: &InterfaceStat) -> InterfaceTraffic {
    InterfaceTraffic {
        device_id: stat.device_id.clone().unwrap_or_else(|| "unknown".into()),
        interface_name: stat.interface_name.clone(),
        rx_bytes: stat.rx_bytes,
        tx_bytes: stat.tx_bytes,
        rx_packets: stat.rx_packets,
        tx_packets: stat.tx_packets,
        rx_errors: stat.rx_errors,
        tx_errors: stat.tx_errors,
        total_bytes: stat.total_bytes(),
    }
}

/// `min(((rx + tx) / 1e6) mod 100, 100)` -- the source's synthetic
/// placeholder, preserved unchanged.
pub(crate) fn utilization_percent(rx_bytes: u64, tx_bytes: u64) -> f64 {
    let scaled = rx_bytes.saturating_add(tx_bytes) as f64 / 1_000_000.0;
    (scaled % 100.0).min(100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
