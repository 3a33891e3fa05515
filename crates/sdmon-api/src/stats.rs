// Interface statistics endpoint.

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::InterfaceStat;

impl Client {
    /// Interface statistics across all devices.
    ///
    /// `GET /dataservice/statistics/interface`
    pub async fn interface_statistics(&self) -> Result<Vec<InterfaceStat>, Error> {
        debug!("fetching interface statistics");
        self.fetch_as("/dataservice/statistics/interface").await
    }
}
