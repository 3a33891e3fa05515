// Network-wide health summary.

use crate::model::{DeviceDetail, HealthRating, HealthSummary, SummaryStats};
use crate::monitor::Monitor;

impl Monitor {
    /// Health summary across all fabric devices.
    ///
    /// Counts reachable vs unreachable devices and buckets overall health by
    /// up-percentage. With no devices (or a failed fetch) the rating stays
    /// `unknown`.
    pub async fn health_summary(&self) -> HealthSummary {
        let devices = self.devices_or_empty().await;

        let total_devices = devices.len();
        let devices_up = devices.iter().filter(|d| d.is_reachable()).count();
        let devices_down = total_devices - devices_up;

        let device_details = devices
            .iter()
            .map(|d| DeviceDetail {
                device_id: d.device_id_or_unknown(),
                hostname: d.hostname.clone(),
                status: d.status.clone(),
                reachability: d.reachability.clone(),
                device_type: d.device_type.clone(),
            })
            .collect();

        HealthSummary {
            total_devices,
            devices_up,
            devices_down,
            devices_with_issues: 0,
            overall_health: health_rating(devices_up, total_devices),
            device_details,
            summary_stats: SummaryStats::default(),
        }
    }
}

/// Bucket overall health by device up-percentage.
pub(crate) fn health_rating(devices_up: usize, total_devices: usize) -> HealthRating {
    if total_devices == 0 {
        return HealthRating::Unknown;
    }
    let up_percentage = (devices_up as f64 / total_devices as f64) * 100.0;
    if up_percentage >= 95.0 {
        HealthRating::Excellent
    } else if up_percentage >= 80.0 {
        HealthRating::Good
    } else if up_percentage >= 60.0 {
        HealthRating::Fair
    } else {
        HealthRating::Poor
    }
}
