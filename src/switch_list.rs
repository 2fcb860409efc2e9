use crate::{
    config::Config,
    query_engine::SnmpBackend,
    switch::{PollError, SwitchManager, SwitchReport},
};
use anyhow::{bail, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchTarget {
    pub ip_address: String,
    pub community: String,
}

#[derive(Debug)]
pub struct SwitchList {
    pub targets: Vec<SwitchTarget>,
}

impl SwitchList {
    pub fn from_csv(path: &Path) -> Result<Self> {
        // Check that the file exists
        if !path.exists() {
            bail!("File {} does not exist", path.display());
        }

        let reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut targets = Vec::new();
        for line in reader.into_records() {
            let line = line?;
            let target: SwitchTarget = line.deserialize(None)?;
            targets.push(target);
        }

        Ok(Self { targets })
    }

    /// Polls each switch in turn. One switch failing does not stop the rest.
    pub async fn poll_all<B: SnmpBackend + Clone>(
        &self,
        config: &Config,
        backend: &B,
    ) -> Vec<(SwitchTarget, Result<SwitchReport, PollError>)> {
        let mut results = Vec::with_capacity(self.targets.len());
        for target in self.targets.iter() {
            let manager =
                SwitchManager::with_backend(target.clone(), config.clone(), backend.clone());
            let report = manager.poll().await;
            if let Err(e) = &report {
                error!("Switch {} failed: {e}", target.ip_address);
            }
            results.push((target.clone(), report));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SwitchError, switch::mock::MockAgent};
    use async_snmp::Value;
    use std::io::Write;

    #[test]
    fn reads_targets_with_comments_and_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ip_address,community").unwrap();
        writeln!(file, "# core switches").unwrap();
        writeln!(file, "10.0.0.1, public").unwrap();
        writeln!(file, " 10.0.0.2 ,s3cret").unwrap();
        file.flush().unwrap();

        let list = SwitchList::from_csv(file.path()).unwrap();
        assert_eq!(
            list.targets,
            vec![
                SwitchTarget {
                    ip_address: "10.0.0.1".to_string(),
                    community: "public".to_string(),
                },
                SwitchTarget {
                    ip_address: "10.0.0.2".to_string(),
                    community: "s3cret".to_string(),
                },
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SwitchList::from_csv(&dir.path().join("switches.csv")).is_err());
    }

    #[tokio::test]
    async fn polls_every_switch_in_order() {
        let agent = MockAgent::new();
        agent.set("1.3.6.1.2.1.1.1.0", Value::from("Cisco NX-OS(tm) n9000"));
        agent.set("1.3.6.1.2.1.1.5.0", Value::from("leaf-1"));

        let list = SwitchList {
            targets: vec![
                SwitchTarget {
                    ip_address: "192.0.2.1".to_string(),
                    community: "public".to_string(),
                },
                SwitchTarget {
                    ip_address: "192.0.2.2".to_string(),
                    community: "public".to_string(),
                },
            ],
        };
        let results = list.poll_all(&Config::default(), &agent).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
        assert_eq!(results[1].0.ip_address, "192.0.2.2");
        assert_eq!(results[0].1.as_ref().unwrap().info.hostname, "leaf-1");
    }

    #[tokio::test]
    async fn unreachable_switches_are_reported_per_target() {
        let agent = MockAgent::new();
        agent.refuse_connections();
        let list = SwitchList {
            targets: vec![SwitchTarget {
                ip_address: "192.0.2.9".to_string(),
                community: "public".to_string(),
            }],
        };
        let results = list.poll_all(&Config::default(), &agent).await;
        assert!(matches!(
            &results[0].1,
            Err(PollError {
                source: SwitchError::Connection { .. },
                ..
            })
        ));
    }
}
