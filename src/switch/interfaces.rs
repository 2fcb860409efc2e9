use crate::{
    config::OidTable,
    error::SwitchError,
    query_engine::{as_index, as_int, as_string, binding, indexed_oid, parse_oid, SnmpSession},
};
use async_snmp::Oid;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchInterface {
    pub name: String,
    // Fetched for every row, not part of the rate table
    #[allow(dead_code)]
    pub label: String,
    pub snmp_index: u32,
    #[allow(dead_code)]
    pub status: String,
}

impl SwitchInterface {
    /// Walks `ifIndex`, then fetches description, alias and (optionally)
    /// operational status one row at a time. Rows whose GET fails are
    /// logged and skipped.
    pub(crate) async fn list_from_snmp<S: SnmpSession>(
        session: &S,
        oids: &OidTable,
    ) -> Result<Vec<Self>, SwitchError> {
        let if_index = parse_oid(&oids.if_index)?;
        let indices = session
            .walk(&if_index)
            .await?
            .iter()
            .map(as_index)
            .collect::<Result<Vec<u32>, _>>()?;
        debug!("Discovered {} interfaces", indices.len());

        let mut interfaces = Vec::with_capacity(indices.len());
        for index in indices {
            match Self::from_snmp(session, oids, index).await {
                Ok(interface) => interfaces.push(interface),
                Err(e) => warn!("Skipping interface {index}: {e}"),
            }
        }

        Ok(interfaces)
    }

    async fn from_snmp<S: SnmpSession>(
        session: &S,
        oids: &OidTable,
        index: u32,
    ) -> Result<Self, SwitchError> {
        let descr = indexed_oid(&oids.if_descr, index)?;
        let alias = indexed_oid(&oids.if_alias, index)?;
        let status = oids
            .if_oper_status
            .as_deref()
            .map(|column| indexed_oid(column, index))
            .transpose()?;

        let mut request: Vec<Oid> = vec![descr.clone(), alias.clone()];
        request.extend(status.iter().cloned());
        let results = session.get(&request).await?;

        // Not every platform populates ifAlias
        let label = as_string(binding(&results, &alias)?).unwrap_or_default();
        let status = match &status {
            Some(oid) => as_int(binding(&results, oid)?)
                .map(oper_status)
                .unwrap_or("unknown"),
            None => "unknown",
        };

        Ok(SwitchInterface {
            name: as_string(binding(&results, &descr)?)?,
            label,
            snmp_index: index,
            status: status.to_string(),
        })
    }
}

/// IF-MIB ifOperStatus
fn oper_status(value: i32) -> &'static str {
    match value {
        1 => "up",
        2 => "down",
        3 => "testing",
        5 => "dormant",
        6 => "notPresent",
        7 => "lowerLayerDown",
        _ => "unknown",
    }
}
