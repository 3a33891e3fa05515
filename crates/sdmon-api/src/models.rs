// Wire models for the controller's monitoring endpoints.
//
// The controller's JSON is inconsistent about field presence and sometimes
// emits counters as strings, so every field carries `#[serde(default)]` and
// counters go through a lenient deserializer. Missing descriptive fields
// default to `"unknown"` -- the same value downstream summaries report.

use serde::{Deserialize, Deserializer, Serialize};

fn unknown() -> String {
    "unknown".into()
}

/// Accept a counter as a JSON number, a numeric string, or null.
/// Anything unparseable collapses to 0 rather than failing the record.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
        Null(Option<()>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Str(s) => s.trim().parse().unwrap_or(0),
        Raw::Null(_) => 0,
    })
}

// ── Device ───────────────────────────────────────────────────────────

/// Fabric device from `/dataservice/device`.
///
/// The controller returns many more fields per device; the ones the
/// monitoring layer reads are modeled explicitly and the rest land in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier used as the `deviceId` query parameter on
    /// device-scoped endpoints. Devices without one are skipped by fan-outs.
    #[serde(rename = "deviceId", default)]
    pub device_id: Option<String>,
    #[serde(default = "unknown")]
    pub hostname: String,
    /// Operational status (`normal`, `warning`, ...), distinct from
    /// reachability.
    #[serde(default = "unknown")]
    pub status: String,
    /// Connectivity state: `reachable` or `unreachable`.
    #[serde(default = "unknown")]
    pub reachability: String,
    #[serde(rename = "deviceType", default = "unknown")]
    pub device_type: String,
    #[serde(default = "unknown")]
    pub version: String,
    #[serde(rename = "site-id", default)]
    pub site_id: Option<String>,
    #[serde(rename = "system-ip", default)]
    pub system_ip: Option<String>,
    /// Last-updated timestamp; the controller emits either epoch millis or a
    /// formatted string depending on version.
    #[serde(default)]
    pub lastupdated: Option<serde_json::Value>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Device {
    /// The device id, or `"unknown"` for display in summaries.
    pub fn device_id_or_unknown(&self) -> String {
        self.device_id.clone().unwrap_or_else(unknown)
    }

    /// Exact match on the controller's `reachability` value. Case variants
    /// are treated as not reachable, matching the controller contract.
    pub fn is_reachable(&self) -> bool {
        self.reachability == "reachable"
    }
}

// ── Interface statistics ─────────────────────────────────────────────

/// Per-interface counters from `/dataservice/statistics/interface`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStat {
    #[serde(rename = "deviceId", default)]
    pub device_id: Option<String>,
    #[serde(rename = "interface", default = "unknown")]
    pub interface_name: String,
    #[serde(rename = "rx_octets", default, deserialize_with = "lenient_u64")]
    pub rx_bytes: u64,
    #[serde(rename = "tx_octets", default, deserialize_with = "lenient_u64")]
    pub tx_bytes: u64,
    #[serde(rename = "rx_pkts", default, deserialize_with = "lenient_u64")]
    pub rx_packets: u64,
    #[serde(rename = "tx_pkts", default, deserialize_with = "lenient_u64")]
    pub tx_packets: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub rx_errors: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub tx_errors: u64,
    /// `if-admin-status`: `up` or `down`.
    #[serde(rename = "if-admin-status", default)]
    pub admin_status: Option<String>,
    #[serde(rename = "ip-address", default)]
    pub ip_address: Option<String>,
}

impl InterfaceStat {
    /// Combined byte counter, derived locally -- the controller does not
    /// supply it.
    pub fn total_bytes(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }

    pub fn is_admin_up(&self) -> bool {
        self.admin_status.as_deref() == Some("up")
    }
}

// ── BFD ──────────────────────────────────────────────────────────────

/// BFD session from `/dataservice/device/bfd/sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfdSession {
    #[serde(rename = "deviceId", default)]
    pub device_id: Option<String>,
    /// Session identifier; numeric or string depending on controller version.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<serde_json::Value>,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "localAddress", default)]
    pub local_address: Option<String>,
    #[serde(rename = "remoteAddress", default)]
    pub remote_address: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
}

impl BfdSession {
    pub fn is_up(&self) -> bool {
        self.state.eq_ignore_ascii_case("up")
    }
}

// ── Tunnels ──────────────────────────────────────────────────────────

/// Tunnel statistics entry from `/dataservice/device/tunnel/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunnelStat {
    #[serde(default)]
    pub state: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TunnelStat {
    pub fn is_up(&self) -> bool {
        self.state == "up"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_counters_accept_string_numbers() {
        let stat: InterfaceStat = serde_json::from_value(serde_json::json!({
            "deviceId": "200.0.1.1",
            "interface": "ge0/0",
            "rx_octets": "1500",
            "tx_octets": 500,
            "rx_errors": "not-a-number",
        }))
        .expect("interface stat should parse");

        assert_eq!(stat.rx_bytes, 1500);
        assert_eq!(stat.tx_bytes, 500);
        assert_eq!(stat.rx_errors, 0);
        assert_eq!(stat.total_bytes(), 2000);
    }

    #[test]
    fn reachability_match_is_exact() {
        let device = |reachability: &str| -> Device {
            serde_json::from_value(serde_json::json!({ "reachability": reachability }))
                .expect("device fixture")
        };

        assert!(device("reachable").is_reachable());
        assert!(!device("Reachable").is_reachable());
        assert!(!device("REACHABLE").is_reachable());
        assert!(!device("unreachable").is_reachable());
    }

    #[test]
    fn device_defaults_to_unknown_fields() {
        let device: Device = serde_json::from_value(serde_json::json!({})).expect("empty device");
        assert_eq!(device.device_id, None);
        assert_eq!(device.hostname, "unknown");
        assert_eq!(device.reachability, "unknown");
        assert!(!device.is_reachable());
    }
}
