use crate::{config::Config, error::SwitchError, switch_list::SwitchTarget};
use async_snmp::{client::Retry, Auth, Client, Oid, Value, VarBind};
use std::net::{IpAddr, SocketAddr};
use tracing::debug;

/// Opens SNMP sessions. One session is opened per switch operation and
/// dropped when the operation returns.
pub trait SnmpBackend {
    type Session: SnmpSession;

    async fn open(&self, target: &SwitchTarget, config: &Config)
        -> Result<Self::Session, SwitchError>;
}

pub trait SnmpSession {
    /// A single GET carrying every OID in `oids`.
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, SwitchError>;

    /// Every binding under `root`, in OID order.
    async fn walk(&self, root: &Oid) -> Result<Vec<VarBind>, SwitchError>;
}

/// SNMP v2c over UDP via `async-snmp`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UdpBackend;

pub struct UdpSession {
    client: Client,
    max_repetitions: i32,
}

impl SnmpBackend for UdpBackend {
    type Session = UdpSession;

    async fn open(
        &self,
        target: &SwitchTarget,
        config: &Config,
    ) -> Result<Self::Session, SwitchError> {
        let address = socket_address(&target.ip_address, config.port);
        debug!("Opening SNMP session to {address}");
        let client = Client::builder(address.clone(), Auth::v2c(target.community.clone()))
            .timeout(config.timeout())
            .retry(Retry::none())
            .max_repetitions(config.max_repetitions)
            .connect()
            .await
            .map_err(|e| SwitchError::connection(&address, e))?;

        Ok(UdpSession {
            client,
            max_repetitions: i32::try_from(config.max_repetitions).unwrap_or(i32::MAX),
        })
    }
}

impl SnmpSession for UdpSession {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>, SwitchError> {
        Ok(self.client.get_many(oids).await?)
    }

    async fn walk(&self, root: &Oid) -> Result<Vec<VarBind>, SwitchError> {
        let results = self
            .client
            .bulk_walk(root.clone(), self.max_repetitions)
            .collect()
            .await?;
        Ok(results)
    }
}

impl Drop for UdpSession {
    fn drop(&mut self) {
        debug!("Closing SNMP session to {}", self.client.peer_addr());
    }
}

/// `host:port`, bracketing bare IPv6 literals.
pub fn socket_address(host: &str, port: u16) -> String {
    match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::from((ip, port)).to_string(),
        Err(_) => format!("{host}:{port}"),
    }
}

pub fn parse_oid(oid: &str) -> Result<Oid, SwitchError> {
    Oid::parse(oid).map_err(|_| SwitchError::InvalidOid(oid.to_string()))
}

/// A table column OID with the row index appended.
pub fn indexed_oid(column: &str, index: u32) -> Result<Oid, SwitchError> {
    Ok(parse_oid(column)?.child(index))
}

/// Picks the binding for `oid` out of a GET response.
pub fn binding<'a>(results: &'a [VarBind], oid: &Oid) -> Result<&'a VarBind, SwitchError> {
    results
        .iter()
        .find(|vb| vb.oid == *oid)
        .ok_or_else(|| SwitchError::MissingValue {
            oid: oid.to_string(),
        })
}

fn present(vb: &VarBind) -> Result<&Value, SwitchError> {
    if vb.value.is_exception() || vb.value == Value::Null {
        return Err(SwitchError::MissingValue {
            oid: vb.oid.to_string(),
        });
    }
    Ok(&vb.value)
}

fn unexpected(vb: &VarBind) -> SwitchError {
    SwitchError::UnexpectedValue {
        oid: vb.oid.to_string(),
        value: vb.value.to_string(),
    }
}

pub fn as_string(vb: &VarBind) -> Result<String, SwitchError> {
    match present(vb)? {
        Value::OctetString(s) | Value::Opaque(s) => Ok(String::from_utf8_lossy(s).into_owned()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::IpAddress(ip) => Ok(std::net::Ipv4Addr::from(*ip).to_string()),
        Value::Counter32(i) | Value::Gauge32(i) | Value::TimeTicks(i) => Ok(i.to_string()),
        Value::Counter64(i) => Ok(i.to_string()),
        _ => Err(unexpected(vb)),
    }
}

pub fn as_int(vb: &VarBind) -> Result<i32, SwitchError> {
    present(vb)?.as_i32().ok_or_else(|| unexpected(vb))
}

pub fn as_index(vb: &VarBind) -> Result<u32, SwitchError> {
    present(vb)?.as_u32().ok_or_else(|| unexpected(vb))
}

pub fn as_counter(vb: &VarBind) -> Result<u64, SwitchError> {
    present(vb)?.as_u64().ok_or_else(|| unexpected(vb))
}
