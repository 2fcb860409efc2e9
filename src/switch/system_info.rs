use crate::{
    config::OidTable,
    error::SwitchError,
    query_engine::{as_string, binding, parse_oid, SnmpSession},
    version::{classify, OsVersion},
};

#[derive(Default, Debug)]
pub struct SwitchInfo {
    pub hostname: String,
    pub os_version: OsVersion,
}

impl SwitchInfo {
    pub(crate) async fn from_snmp<S: SnmpSession>(
        session: &S,
        oids: &OidTable,
    ) -> Result<Self, SwitchError> {
        let sys_name = parse_oid(&oids.sys_name)?;
        let sys_descr = parse_oid(&oids.sys_descr)?;

        let name = session.get(std::slice::from_ref(&sys_name)).await?;
        let hostname = as_string(binding(&name, &sys_name)?)?;

        let descr = session.get(std::slice::from_ref(&sys_descr)).await?;
        let os_version = classify(&as_string(binding(&descr, &sys_descr)?)?);

        Ok(SwitchInfo {
            hostname,
            os_version,
        })
    }
}
