// BFD session health sweep.

use futures_util::future::join_all;
use tracing::debug;

use crate::model::{BfdHealthResult, BfdSessionDetail};
use crate::monitor::Monitor;

impl Monitor {
    /// Sweep BFD sessions across every device with an id.
    ///
    /// Per-device fetches run concurrently; the session-token coalescing in
    /// the client guarantees at most one re-login even if several fetches
    /// hit an expired session at once. A device whose fetch fails is
    /// skipped, not counted -- it still shows up in `total_devices_checked`.
    pub async fn bfd_session_health(&self, include_details: bool) -> BfdHealthResult {
        let devices = self.devices_or_empty().await;
        let device_ids: Vec<String> = devices.iter().filter_map(|d| d.device_id.clone()).collect();

        let fetches = device_ids
            .iter()
            .map(|id| async move { (id.clone(), self.client.bfd_sessions(id).await) });
        let results = join_all(fetches).await;

        let mut summary = BfdHealthResult {
            total_devices_checked: device_ids.len(),
            devices_with_bfd: 0,
            total_bfd_sessions: 0,
            active_sessions: 0,
            inactive_sessions: 0,
            session_details: include_details.then(Vec::new),
        };

        for (device_id, result) in results {
            let sessions = match result {
                Ok(sessions) => sessions,
                Err(e) => {
                    debug!(device_id, error = %e, "skipping device without BFD data");
                    continue;
                }
            };
            if sessions.is_empty() {
                continue;
            }

            summary.devices_with_bfd += 1;
            summary.total_bfd_sessions += sessions.len();

            for session in &sessions {
                if session.is_up() {
                    summary.active_sessions += 1;
                } else {
                    summary.inactive_sessions += 1;
                }
                if let Some(details) = summary.session_details.as_mut() {
                    details.push(BfdSessionDetail::from_session(&device_id, session));
                }
            }
        }

        summary
    }
}
