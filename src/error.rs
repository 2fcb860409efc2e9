use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while talking to a switch.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("unable to open SNMP session to {target}: {reason}")]
    Connection { target: String, reason: String },

    #[error("timed out after {elapsed:?} waiting for {target}")]
    Timeout { target: String, elapsed: Duration },

    #[error("SNMP request failed: {0}")]
    Protocol(String),

    #[error("no value returned for {oid}")]
    MissingValue { oid: String },

    #[error("unexpected value for {oid}: {value}")]
    UnexpectedValue { oid: String, value: String },

    #[error("invalid OID {0:?}")]
    InvalidOid(String),
}

impl From<Box<async_snmp::Error>> for SwitchError {
    fn from(err: Box<async_snmp::Error>) -> Self {
        match *err {
            async_snmp::Error::Timeout {
                target, elapsed, ..
            } => SwitchError::Timeout {
                target: target.to_string(),
                elapsed,
            },
            async_snmp::Error::Network { target, source, .. } => SwitchError::Connection {
                target: target.to_string(),
                reason: source.to_string(),
            },
            other => SwitchError::Protocol(other.to_string()),
        }
    }
}

impl SwitchError {
    /// Session setup failures are always reported as connection errors,
    /// whatever the client library thinks went wrong.
    pub fn connection(target: &str, err: Box<async_snmp::Error>) -> Self {
        match SwitchError::from(err) {
            SwitchError::Protocol(reason) => SwitchError::Connection {
                target: target.to_string(),
                reason,
            },
            SwitchError::Connection { reason, .. } => SwitchError::Connection {
                target: target.to_string(),
                reason,
            },
            other => other,
        }
    }
}
