use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const CISCO_IOS_SIGNATURE: &str = "Cisco Internetworking";
const CISCO_NXOS_SIGNATURE: &str = "NX-OS";
const JUNOS_SIGNATURE: &str = "Juniper";

static JUNOS_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"JUNOS\s([0-9.a-zA-Z]+),").expect("static regex"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OsFamily {
    #[default]
    Unknown,
    CiscoIos,
    CiscoNxos,
    JunOs,
    // No sysDescr signature maps here yet
    #[allow(dead_code)]
    Arista,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsFamily::Unknown => "Unknown",
            OsFamily::CiscoIos => "Cisco IOS",
            OsFamily::CiscoNxos => "Cisco NX-OS",
            OsFamily::JunOs => "JUNOS",
            OsFamily::Arista => "Arista",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OsVersion {
    pub family: OsFamily,
    pub version: String,
}

impl OsVersion {
    fn detected(family: OsFamily, version: &str) -> Self {
        Self {
            family,
            version: version.to_string(),
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

// First matching signature wins
pub fn classify(sys_descr: &str) -> OsVersion {
    if sys_descr.contains(CISCO_IOS_SIGNATURE) {
        OsVersion::detected(OsFamily::CiscoIos, "unknown")
    } else if sys_descr.contains(CISCO_NXOS_SIGNATURE) {
        OsVersion::detected(OsFamily::CiscoNxos, "unknown")
    } else if sys_descr.contains(JUNOS_SIGNATURE) {
        let version = JUNOS_VERSION
            .captures(sys_descr)
            .and_then(|caps| caps.get(1))
            .map_or("unknown", |m| m.as_str());
        OsVersion::detected(OsFamily::JunOs, version)
    } else {
        OsVersion::default()
    }
}
