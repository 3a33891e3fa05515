//! Aggregated monitoring views over the SD-WAN controller API.
//!
//! The [`Monitor`] facade composes one or more authenticated fetches from
//! `sdmon-api` into derived summaries: health roll-ups, status filters,
//! traffic rankings, BFD sweeps, alert extraction, utilization monitoring,
//! topology assembly, and the full network report.
//!
//! Every operation is a one-shot projection over a fresh controller
//! snapshot. Upstream failures on the primary fetch degrade to zeroed
//! counts (logged, never raised); failures inside a per-device fan-out
//! skip that device without aborting the sweep.

pub mod model;
pub mod monitor;

pub use model::{
    AlertSet, AlertSeverity, BfdHealthResult, BfdSessionDetail, DeviceAlert, DeviceDetail,
    DeviceSummary, FilterResult, HealthRating, HealthSummary, HotInterface, InterfaceSummary,
    InterfaceTraffic, NetworkReport, NetworkTopology, NodeInterface, ReportOptions, StatusFilter,
    SummaryStats, TopInterfacesResult, TopologyNode, TopologySummary, TrafficMetric,
    TunnelSummary, UtilizationReport,
};
pub use monitor::Monitor;
