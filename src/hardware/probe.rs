//! Enrichment of link-up network devices with eswitch mode and SR-IOV
//! virtual function counts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::types::{NetworkDevice, UNKNOWN};

#[derive(Debug, Default, Deserialize)]
pub struct DevlinkOutput {
    #[serde(default)]
    pub dev: HashMap<String, EswitchInfo>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EswitchInfo {
    pub mode: String,
    #[serde(alias = "inline-mode")]
    pub inline_mode: String,
    #[serde(alias = "encap-mode")]
    pub encap_mode: String,
}

pub fn probe_device<R: CommandRunner>(sources: &Sources<R>, device: &mut NetworkDevice) {
    query_eswitch(sources, device);
    read_vf_info(&sources.sysfs_net_root, device);
}

/// lshw writes `pci@0000:3b:00.0`, devlink expects `pci/0000:3b:00.0`.
pub fn devlink_handle(bus_info: &str) -> String {
    bus_info.replacen('@', "/", 1)
}

pub fn parse_eswitch(payload: &[u8], handle: &str) -> Result<Option<EswitchInfo>, serde_json::Error> {
    let mut output: DevlinkOutput = serde_json::from_slice(payload)?;
    Ok(output.dev.remove(handle))
}

fn query_eswitch<R: CommandRunner>(sources: &Sources<R>, device: &mut NetworkDevice) {
    device.devlink_mode = UNKNOWN.to_string();

    if device.device.bus_info.is_empty() {
        debug!(interface = %device.device.logical_name, "No bus address, skipping devlink");
        return;
    }

    let handle = devlink_handle(&device.device.bus_info);
    let args = ["-j", "dev", "eswitch", "show", handle.as_str()];
    let output = match sources.runner.run(&sources.tools.devlink, &args) {
        Ok(output) => output,
        Err(err) => {
            error!(
                error = %err,
                output = %err.output(),
                businfo = %handle,
                "Could not get devlink information"
            );
            return;
        }
    };

    match parse_eswitch(&output.stdout, &handle) {
        Ok(Some(eswitch)) => {
            if !eswitch.mode.is_empty() {
                device.devlink_mode = eswitch.mode;
            }
            device.inline_mode = eswitch.inline_mode;
            device.encap_mode = eswitch.encap_mode;
        }
        Ok(None) => warn!(businfo = %handle, "devlink reported no eswitch for device"),
        Err(err) => error!(
            error = %err,
            output = %String::from_utf8_lossy(&output.stdout),
            businfo = %handle,
            "Error parsing devlink json output"
        ),
    }
}

/// A readable `sriov_totalvfs` marks a physical function. Either file may
/// be absent; the matching count then stays at zero.
pub fn read_vf_info(sysfs_net_root: &Path, device: &mut NetworkDevice) {
    if device.device.logical_name.is_empty() {
        return;
    }
    let base = sysfs_net_root.join(&device.device.logical_name).join("device");

    if let Ok(text) = fs::read_to_string(base.join("sriov_totalvfs")) {
        device.is_pf = true;
        device.max_vfs = parse_vf_count("sriov_totalvfs", &text);
    }

    if let Ok(text) = fs::read_to_string(base.join("sriov_numvfs")) {
        device.num_vfs = parse_vf_count("sriov_numvfs", &text);
    }
}

fn parse_vf_count(file: &str, text: &str) -> u32 {
    text.trim().parse().unwrap_or_else(|err| {
        debug!(file, value = %text.trim(), error = %err, "Unreadable VF count");
        0
    })
}
