use tracing::{info, warn};

use crate::hardware::lshw::{collect_devices, report_lshw_error};
use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::types::{MemoryDevice, MemoryInfo};

/// lshw id of the node describing installed system memory. With more than
/// one array lshw numbers them `memory:0`, `memory:1`, ...
const SYSTEM_MEMORY_ID: &str = "memory";
const BANK_PREFIX: &str = "bank";

fn is_system_memory(id: &str) -> bool {
    id == SYSTEM_MEMORY_ID
        || id
            .strip_prefix(SYSTEM_MEMORY_ID)
            .is_some_and(|rest| rest.starts_with(':'))
}

pub fn collect_memory_info<R: CommandRunner>(sources: &Sources<R>) -> Option<MemoryInfo> {
    let devices: Vec<MemoryDevice> = match collect_devices(sources, "memory") {
        Ok(devices) => devices,
        Err(err) => {
            report_lshw_error("memory", &err);
            return None;
        }
    };

    let summary = summarize_memory(devices);
    if summary.is_none() {
        warn!("No system memory record in lshw output");
    }
    summary
}

/// Picks the system memory record, merging multiple arrays into the first,
/// and counts the banks listed beside them.
pub fn summarize_memory(devices: Vec<MemoryDevice>) -> Option<MemoryInfo> {
    let mut system: Option<MemoryDevice> = None;
    let mut arrays = 0;
    let mut banks = 0;
    let mut populated_banks = 0;

    for device in devices {
        if device.device.id.starts_with(BANK_PREFIX) {
            banks += 1;
            if device.size > 0 {
                populated_banks += 1;
            }
        } else if is_system_memory(&device.device.id) {
            arrays += 1;
            match system.as_mut() {
                Some(first) => {
                    first.size = first.size.saturating_add(device.size);
                    first.capacity = first.capacity.saturating_add(device.capacity);
                }
                None => system = Some(device),
            }
        }
    }

    Some(MemoryInfo {
        system: system?,
        arrays,
        banks,
        populated_banks,
    })
}

pub fn emit_memory_info(memory: &MemoryInfo) {
    let system = &memory.system;
    info!(
        component = "memory",
        description = %system.device.description,
        physid = %system.device.phys_id,
        vendor = %system.device.vendor,
        version = %system.version,
        size_bytes = system.size,
        capacity_bytes = system.capacity,
        units = %system.units,
        arrays = memory.arrays,
        banks = memory.banks,
        populated_banks = memory.populated_banks,
        "Collection complete"
    );
}
