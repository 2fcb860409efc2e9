use anyhow::{Context, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Session parameters and the OID table handed to every switch manager.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub timeout_ms: u64,
    // Setting this to large numbers breaks on some older agents
    pub max_repetitions: u32,
    pub oids: OidTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 161,
            timeout_ms: 2000,
            max_repetitions: 20,
            oids: OidTable::default(),
        }
    }
}

impl Config {
    /// Reads `path` if it exists, otherwise falls back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&config).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Where each value lives in the agent's MIB. Per-interface entries are
/// column roots; the interface index is appended at query time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OidTable {
    pub sys_descr: String,
    pub sys_name: String,
    pub if_index: String,
    pub if_descr: String,
    pub if_alias: String,
    pub if_oper_status: Option<String>,
    pub if_in_rate: String,
    pub if_out_rate: String,
    pub if_in_errors: String,
    pub if_out_errors: String,
    pub if_in_packets: Option<String>,
    pub if_out_packets: Option<String>,
}

impl Default for OidTable {
    fn default() -> Self {
        Self {
            sys_descr: "1.3.6.1.2.1.1.1.0".to_string(),
            sys_name: "1.3.6.1.2.1.1.5.0".to_string(),
            if_index: "1.3.6.1.2.1.2.2.1.1".to_string(),
            if_descr: "1.3.6.1.2.1.2.2.1.2".to_string(),
            if_alias: "1.3.6.1.2.1.31.1.1.1.18".to_string(),
            if_oper_status: Some("1.3.6.1.2.1.2.2.1.8".to_string()),
            // Juniper jnxIfTable
            if_in_rate: "1.3.6.1.4.1.2636.3.3.1.1.1".to_string(),
            if_out_rate: "1.3.6.1.4.1.2636.3.3.1.1.4".to_string(),
            if_in_errors: "1.3.6.1.4.1.2636.3.3.1.1.9".to_string(),
            if_out_errors: "1.3.6.1.4.1.2636.3.3.1.1.24".to_string(),
            if_in_packets: None,
            if_out_packets: None,
        }
    }
}
