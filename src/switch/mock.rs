//! In-memory SNMP agent for exercising the switch manager without a network.

use crate::{
    config::Config,
    error::SwitchError,
    query_engine::{parse_oid, SnmpBackend, SnmpSession},
    switch_list::SwitchTarget,
};
use async_snmp::{Oid, Value, VarBind};
use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Default)]
struct AgentState {
    values: BTreeMap<Oid, Value>,
    timeouts: HashSet<Oid>,
    refuse: bool,
    opened: usize,
    closed: usize,
    get_requests: usize,
}

#[derive(Clone, Default)]
pub struct MockAgent {
    state: Arc<Mutex<AgentState>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, oid: &str, value: Value) {
        let oid = parse_oid(oid).unwrap();
        self.state.lock().unwrap().values.insert(oid, value);
    }

    /// Any GET naming `oid`, or any walk rooted at it, times out.
    pub fn time_out(&self, oid: &str) {
        let oid = parse_oid(oid).unwrap();
        self.state.lock().unwrap().timeouts.insert(oid);
    }

    pub fn refuse_connections(&self) {
        self.state.lock().unwrap().refuse = true;
    }

    pub fn opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }

    pub fn get_requests(&self) -> usize {
        self.state.lock().unwrap().get_requests
    }

    fn timeout(target: &str) -> SwitchError {
        SwitchError::Timeout {
            target: target.to_string(),
            elapsed: Duration::from_secs(2),
        }
    }
}

pub struct MockSession {
    agent: MockAgent,
    target: String,
}

impl SnmpBackend for MockAgent {
    type Session = MockSession;

    async fn open(
        &self,
        target: &SwitchTarget,
        _config: &Config,
    ) -> Result<Self::Session, SwitchError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse {
            return Err(SwitchError::Connection {
                target: target.ip_address.clone(),
                reason: "connection refused".to_string(),
            });
        }
        state.opened += 1;
        Ok(MockSession {
            agent: self.clone(),
            target: target.ip_address.clone(),
        })
    }
}

impl SnmpSession for MockSession {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, SwitchError> {
        let mut state = self.agent.state.lock().unwrap();
        state.get_requests += 1;
        if oids.iter().any(|oid| state.timeouts.contains(oid)) {
            return Err(MockAgent::timeout(&self.target));
        }
        Ok(oids
            .iter()
            .map(|oid| {
                let value = state
                    .values
                    .get(oid)
                    .cloned()
                    .unwrap_or(Value::NoSuchInstance);
                VarBind::new(oid.clone(), value)
            })
            .collect())
    }

    async fn walk(&self, root: &Oid) -> Result<Vec<VarBind>, SwitchError> {
        let state = self.agent.state.lock().unwrap();
        if state.timeouts.contains(root) {
            return Err(MockAgent::timeout(&self.target));
        }
        Ok(state
            .values
            .iter()
            .filter(|(oid, _)| oid.starts_with(root) && *oid != root)
            .map(|(oid, value)| VarBind::new(oid.clone(), value.clone()))
            .collect())
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        if let Ok(mut state) = self.agent.state.lock() {
            state.closed += 1;
        }
    }
}
