// Topology assembly from device and interface snapshots.

use std::collections::HashMap;

use crate::model::{NetworkTopology, NodeInterface, TopologyNode, TopologySummary};
use crate::monitor::Monitor;

impl Monitor {
    /// Assemble the network topology: one node per device, with matching
    /// interfaces grouped by device id and attached to it.
    ///
    /// A device with no matching interfaces keeps no `interfaces` key in the
    /// serialized output.
    pub async fn network_topology(&self) -> NetworkTopology {
        let devices = self.devices_or_empty().await;
        let interfaces = self.interfaces_or_empty().await;

        let mut network_summary = TopologySummary {
            total_devices: devices.len(),
            total_interfaces: interfaces.len(),
            device_types: std::collections::BTreeMap::new(),
        };

        let mut by_device: HashMap<&str, Vec<NodeInterface>> = HashMap::new();
        for stat in &interfaces {
            let Some(device_id) = stat.device_id.as_deref() else {
                continue;
            };
            by_device.entry(device_id).or_default().push(NodeInterface {
                interface: stat.interface_name.clone(),
                status: stat.admin_status.clone(),
                ip_address: stat.ip_address.clone(),
            });
        }

        let mut nodes = Vec::with_capacity(devices.len());
        for device in &devices {
            *network_summary
                .device_types
                .entry(device.device_type.clone())
                .or_insert(0) += 1;

            let attached = device
                .device_id
                .as_deref()
                .and_then(|id| by_device.get(id).cloned());

            nodes.push(TopologyNode {
                device_id: device.device_id_or_unknown(),
                hostname: device.hostname.clone(),
                device_type: device.device_type.clone(),
                status: device.reachability.clone(),
                site_id: device.site_id.clone(),
                system_ip: device.system_ip.clone(),
                version: device.version.clone(),
                interfaces: attached,
            });
        }

        NetworkTopology {
            nodes,
            connections: Vec::new(),
            network_summary,
        }
    }
}
