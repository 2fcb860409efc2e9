use crate::{
    switch::{InterfaceReport, PollError, SwitchInfo, SwitchReport},
    switch_list::SwitchTarget,
    version::OsFamily,
};
use std::fmt::Write;

const TABLE_HEADER: &str = "Interface       In     Out\n=============== ====== =======\n";
const UNAVAILABLE: &str = "n/a";

/// Renders the plain-text report for one switch.
pub fn render(report: &SwitchReport) -> String {
    let mut out = identity(&report.info);
    out.push_str(TABLE_HEADER);
    for row in report.rows.iter() {
        out.push_str(&interface_row(row));
        out.push('\n');
    }
    out
}

/// The identity lines, when they were fetched, then `error: ...`.
pub fn render_error(err: &PollError) -> String {
    let mut out = err.info.as_ref().map(identity).unwrap_or_default();
    let _ = writeln!(out, "error: {}", err.source);
    out
}

/// Reports separated by a blank line. The flag is set when any switch failed.
pub fn render_inventory(
    results: &[(SwitchTarget, Result<SwitchReport, PollError>)],
) -> (String, bool) {
    let mut out = String::new();
    let mut failed = false;
    for (idx, (_, result)) in results.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        match result {
            Ok(report) => out.push_str(&render(report)),
            Err(e) => {
                failed = true;
                out.push_str(&render_error(e));
            }
        }
    }
    (out, failed)
}

fn identity(info: &SwitchInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", info.hostname);
    if info.os_version.family != OsFamily::Unknown {
        let _ = writeln!(out, "OS: {}", info.os_version);
    }
    out.push('\n');
    out
}

fn interface_row(row: &InterfaceReport) -> String {
    let (bits_in, bits_out) = match &row.stats {
        Ok(stats) => (
            stats.bits_in_per_second.to_string(),
            stats.bits_out_per_second.to_string(),
        ),
        Err(_) => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    };
    format!("{:<15.15} {:<6} {:<6}", row.interface.name, bits_in, bits_out)
}
