use tracing::{debug, info};

use crate::hardware::lshw::{collect_devices, report_lshw_error};
use crate::hardware::probe::probe_device;
use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::types::NetworkDevice;

/// Entry point: every link-up NIC reported by lshw, enriched with its
/// eswitch mode and SR-IOV counts. Interfaces without link are not probed.
pub fn collect_network_info<R: CommandRunner>(sources: &Sources<R>) -> Vec<NetworkDevice> {
    let devices: Vec<NetworkDevice> = match collect_devices(sources, "net") {
        Ok(devices) => devices,
        Err(err) => {
            report_lshw_error("net", &err);
            info!("No network devices found, skipping NIC collection");
            return Vec::new();
        }
    };

    devices
        .into_iter()
        .filter_map(|mut nic| {
            if !nic.device.link_up() {
                debug!(interface = %nic.device.logical_name, "Skipping interface without link");
                return None;
            }
            probe_device(sources, &mut nic);
            Some(nic)
        })
        .collect()
}

pub fn emit_network_device(nic: &NetworkDevice) {
    let device = &nic.device;
    info!(
        component = "nic",
        id = %device.id,
        product = %device.product,
        vendor = %device.vendor,
        description = %device.description,
        businfo = %device.bus_info,
        logicalname = %device.logical_name,
        driver = %device.configuration.driver,
        driverversion = %device.configuration.driver_version,
        firmware = %device.configuration.firmware_version,
        mode = %nic.devlink_mode,
        inline_mode = %nic.inline_mode,
        encap_mode = %nic.encap_mode,
        num_vfs = nic.num_vfs,
        max_vfs = nic.max_vfs,
        is_pf = nic.is_pf,
        "Collection complete"
    );
}
