// Aggregated result types.
//
// Every type here is a pure projection computed fresh from controller
// snapshots -- nothing has identity or persists between calls. Optional
// report sections serialize as explicit `null` (not omitted keys) so callers
// can distinguish "disabled" from "empty"; the one exception is the topology
// node's `interfaces` key, which is absent for devices with no interfaces.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use sdmon_api::{BfdSession, Device};

// ── Argument enums ──────────────────────────────────────────────────

/// Status filter understood by [`filter_devices`](crate::Monitor::filter_devices).
///
/// `up`/`down` match the reachability field; the rest match the operational
/// status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Up,
    Down,
    Normal,
    Critical,
    Warning,
}

/// Ranking metric for [`top_interfaces`](crate::Monitor::top_interfaces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrafficMetric {
    RxBytes,
    TxBytes,
    TotalBytes,
    RxPackets,
    TxPackets,
}

/// Alert severity; `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
    All,
}

// ── Health summary ──────────────────────────────────────────────────

/// Overall network health bucketed by device up-percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSummary {
    pub total_devices: usize,
    pub devices_up: usize,
    pub devices_down: usize,
    pub devices_with_issues: usize,
    pub overall_health: HealthRating,
    pub device_details: Vec<DeviceDetail>,
    pub summary_stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceDetail {
    pub device_id: String,
    pub hostname: String,
    pub status: String,
    pub reachability: String,
    pub device_type: String,
}

/// Interface/BFD roll-up slots carried by the health summary. Populated by
/// the full report path; the standalone summary leaves them zeroed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_interfaces: usize,
    pub active_interfaces: usize,
    pub total_bfd_sessions: usize,
    pub active_bfd_sessions: usize,
}

// ── Device filtering ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    pub filter_criteria: StatusFilter,
    pub total_devices: usize,
    pub filtered_count: usize,
    pub devices: Vec<Device>,
}

// ── Interface ranking ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopInterfacesResult {
    pub metric: TrafficMetric,
    pub limit: usize,
    pub total_interfaces: usize,
    pub top_interfaces: Vec<InterfaceTraffic>,
}

/// Interface counters with the derived `total_bytes` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceTraffic {
    pub device_id: String,
    pub interface_name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub total_bytes: u64,
}

impl InterfaceTraffic {
    /// Value of the requested ranking metric.
    pub fn metric_value(&self, metric: TrafficMetric) -> u64 {
        match metric {
            TrafficMetric::RxBytes => self.rx_bytes,
            TrafficMetric::TxBytes => self.tx_bytes,
            TrafficMetric::TotalBytes => self.total_bytes,
            TrafficMetric::RxPackets => self.rx_packets,
            TrafficMetric::TxPackets => self.tx_packets,
        }
    }
}

// ── BFD health ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BfdHealthResult {
    pub total_devices_checked: usize,
    pub devices_with_bfd: usize,
    pub total_bfd_sessions: usize,
    pub active_sessions: usize,
    pub inactive_sessions: usize,
    /// Per-session breakdown; `null` unless details were requested.
    pub session_details: Option<Vec<BfdSessionDetail>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BfdSessionDetail {
    pub device_id: String,
    pub session_id: Option<serde_json::Value>,
    pub state: String,
    pub local_address: Option<String>,
    pub remote_address: Option<String>,
    pub interface: Option<String>,
}

impl BfdSessionDetail {
    pub(crate) fn from_session(device_id: &str, session: &BfdSession) -> Self {
        Self {
            device_id: device_id.to_owned(),
            session_id: session.session_id.clone(),
            state: session.state.clone(),
            local_address: session.local_address.clone(),
            remote_address: session.remote_address.clone(),
            interface: session.interface.clone(),
        }
    }
}

// ── Alerts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSet {
    pub severity_filter: AlertSeverity,
    pub total_alerts: usize,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
    pub info_alerts: usize,
    pub alerts: Vec<DeviceAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceAlert {
    pub device_id: String,
    pub hostname: String,
    pub severity: AlertSeverity,
    pub message: String,
    /// Last-updated marker from the device record; `"unknown"` when absent.
    pub timestamp: serde_json::Value,
}

// ── Utilization ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationReport {
    pub threshold_percent: f64,
    pub total_interfaces: usize,
    pub high_utilization_interfaces: usize,
    pub interfaces_over_threshold: Vec<HotInterface>,
    pub average_utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotInterface {
    pub device_id: String,
    pub interface: String,
    pub utilization_percent: f64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub status: Option<String>,
}

// ── Topology ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkTopology {
    pub nodes: Vec<TopologyNode>,
    /// Link inference is not implemented; reserved in the output shape.
    pub connections: Vec<serde_json::Value>,
    pub network_summary: TopologySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyNode {
    pub device_id: String,
    pub hostname: String,
    pub device_type: String,
    /// Reachability, not operational status.
    pub status: String,
    pub site_id: Option<String>,
    pub system_ip: Option<String>,
    pub version: String,
    /// Absent (not null) for devices with no matching interfaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<NodeInterface>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInterface {
    pub interface: String,
    pub status: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopologySummary {
    pub total_devices: usize,
    pub total_interfaces: usize,
    pub device_types: BTreeMap<String, usize>,
}

// ── Full report ─────────────────────────────────────────────────────

/// Which optional sections [`network_report`](crate::Monitor::network_report)
/// assembles. Disabled sections serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub include_interfaces: bool,
    pub include_bfd: bool,
    pub include_tunnels: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_interfaces: true,
            include_bfd: true,
            include_tunnels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub report_timestamp: DateTime<Utc>,
    pub network_overview: HealthSummary,
    pub device_summary: DeviceSummary,
    pub interface_summary: Option<InterfaceSummary>,
    pub bfd_summary: Option<BfdHealthResult>,
    pub tunnel_summary: Option<TunnelSummary>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub total_devices: usize,
    pub device_types: BTreeMap<String, usize>,
    pub software_versions: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceSummary {
    pub total_interfaces: usize,
    pub active_interfaces: usize,
    /// Interfaces with more than 100 rx or tx errors.
    pub high_error_interfaces: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TunnelSummary {
    pub total_tunnels: usize,
    pub active_tunnels: usize,
}
