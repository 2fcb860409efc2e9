use crate::{
    config::Config,
    error::SwitchError,
    query_engine::{SnmpBackend, UdpBackend},
    switch_list::SwitchTarget,
};
use thiserror::Error;
use tracing::{debug, warn};
mod if_stats;
pub use if_stats::SwitchIfStats;
mod interfaces;
pub use interfaces::SwitchInterface;
mod system_info;
pub use system_info::SwitchInfo;
#[cfg(test)]
pub(crate) mod mock;

/// Queries a single switch. Every call opens its own session and releases
/// it before returning, on success and on error alike.
pub struct SwitchManager<B: SnmpBackend = UdpBackend> {
    target: SwitchTarget,
    config: Config,
    backend: B,
}

impl SwitchManager {
    pub fn new(target: SwitchTarget, config: Config) -> Self {
        Self::with_backend(target, config, UdpBackend)
    }
}

impl<B: SnmpBackend> SwitchManager<B> {
    pub fn with_backend(target: SwitchTarget, config: Config, backend: B) -> Self {
        Self {
            target,
            config,
            backend,
        }
    }

    pub async fn get_version(&self) -> Result<SwitchInfo, SwitchError> {
        let session = self.backend.open(&self.target, &self.config).await?;
        SwitchInfo::from_snmp(&session, &self.config.oids).await
    }

    pub async fn get_ifs(&self) -> Result<Vec<SwitchInterface>, SwitchError> {
        let session = self.backend.open(&self.target, &self.config).await?;
        SwitchInterface::list_from_snmp(&session, &self.config.oids).await
    }

    pub async fn get_if_stats(
        &self,
        interface: &SwitchInterface,
    ) -> Result<SwitchIfStats, SwitchError> {
        let session = self.backend.open(&self.target, &self.config).await?;
        SwitchIfStats::from_snmp(&session, &self.config.oids, interface.snmp_index).await
    }

    /// Identity, inventory, then stats for each interface in turn. Only the
    /// first two are fatal; a stats failure is kept next to its interface.
    pub async fn poll(&self) -> Result<SwitchReport, PollError> {
        debug!("Polling {}", self.target.ip_address);
        let info = self.get_version().await.map_err(|source| PollError {
            info: None,
            source,
        })?;
        let interfaces = match self.get_ifs().await {
            Ok(interfaces) => interfaces,
            Err(source) => {
                return Err(PollError {
                    info: Some(info),
                    source,
                })
            }
        };

        let mut rows = Vec::with_capacity(interfaces.len());
        for interface in interfaces {
            let stats = self.get_if_stats(&interface).await;
            if let Err(e) = &stats {
                warn!(
                    "Stats unavailable for {} ({}) on {}: {e}",
                    interface.name, interface.snmp_index, self.target.ip_address
                );
            }
            rows.push(InterfaceReport { interface, stats });
        }
        debug!("Finished polling {}", self.target.ip_address);

        Ok(SwitchReport { info, rows })
    }
}

#[derive(Debug)]
pub struct SwitchReport {
    pub info: SwitchInfo,
    pub rows: Vec<InterfaceReport>,
}

/// A fatal poll failure, with the identity if it was fetched before the
/// inventory failed.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PollError {
    pub info: Option<SwitchInfo>,
    pub source: SwitchError,
}

#[derive(Debug)]
pub struct InterfaceReport {
    pub interface: SwitchInterface,
    pub stats: Result<SwitchIfStats, SwitchError>,
}
