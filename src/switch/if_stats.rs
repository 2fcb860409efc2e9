use crate::{
    config::OidTable,
    error::SwitchError,
    query_engine::{as_counter, binding, indexed_oid, SnmpSession},
};
use async_snmp::Oid;

/// A point-in-time snapshot. The rate columns are the agent's own one-second
/// averages, so no sampling happens here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwitchIfStats {
    pub bits_in_per_second: u64,
    pub bits_out_per_second: u64,
    // Only the rates are printed
    #[allow(dead_code)]
    pub packets_in: Option<u64>,
    #[allow(dead_code)]
    pub packets_out: Option<u64>,
    #[allow(dead_code)]
    pub in_errors: u64,
    #[allow(dead_code)]
    pub out_errors: u64,
}

impl SwitchIfStats {
    pub(crate) async fn from_snmp<S: SnmpSession>(
        session: &S,
        oids: &OidTable,
        index: u32,
    ) -> Result<Self, SwitchError> {
        let in_rate = indexed_oid(&oids.if_in_rate, index)?;
        let out_rate = indexed_oid(&oids.if_out_rate, index)?;
        let in_errors = indexed_oid(&oids.if_in_errors, index)?;
        let out_errors = indexed_oid(&oids.if_out_errors, index)?;
        let packets_in = optional_column(oids.if_in_packets.as_deref(), index)?;
        let packets_out = optional_column(oids.if_out_packets.as_deref(), index)?;

        let mut request = vec![
            in_rate.clone(),
            out_rate.clone(),
            in_errors.clone(),
            out_errors.clone(),
        ];
        request.extend(packets_in.iter().chain(packets_out.iter()).cloned());
        let results = session.get(&request).await?;

        let counter = |oid: &Oid| binding(&results, oid).and_then(as_counter);
        let optional = |oid: &Option<Oid>| oid.as_ref().map(counter).transpose();

        Ok(SwitchIfStats {
            bits_in_per_second: counter(&in_rate)?,
            bits_out_per_second: counter(&out_rate)?,
            packets_in: optional(&packets_in)?,
            packets_out: optional(&packets_out)?,
            in_errors: counter(&in_errors)?,
            out_errors: counter(&out_errors)?,
        })
    }
}

fn optional_column(column: Option<&str>, index: u32) -> Result<Option<Oid>, SwitchError> {
    column.map(|c| indexed_oid(c, index)).transpose()
}
