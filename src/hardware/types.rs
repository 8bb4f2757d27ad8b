use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hardware::lshw::one_or_many_names;

/// Sentinel for values that could not be determined.
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Serialize)]
pub struct Inventory {
    pub agent_version: String,
    pub collected_at: DateTime<Utc>,
    pub kernel: KernelInfo,
    pub cpu: CpuReport,
    pub memory: Option<MemoryInfo>,
    pub network: Vec<NetworkDevice>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct KernelInfo {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub kdump_status: String,
    pub crashkernel: String,
}

/// Flat view of the lscpu tree. Fields stay empty unless a matching label
/// was found.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CpuInfo {
    pub architecture: String,
    pub vendor_id: String,
    pub model_name: String,
    pub cpu_family: String,
    pub model: String,
    pub stepping: String,
    pub threads_per_core: String,
    pub cores_per_socket: String,
    pub sockets: String,
    pub numa_nodes: String,
    pub cpu_frequency_min_mhz: String,
    pub cpu_frequency_max_mhz: String,
    pub virtualization: String,
}

/// CPU attributes together with the thread count derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct CpuReport {
    #[serde(flatten)]
    pub info: CpuInfo,
    pub total_threads: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfiguration {
    pub driver: String,
    #[serde(rename = "driverversion")]
    pub driver_version: String,
    #[serde(rename = "firmware")]
    pub firmware_version: String,
    pub link: String,
}

/// Fields every lshw record shares, whatever its class.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: String,
    pub product: String,
    pub vendor: String,
    pub description: String,
    #[serde(rename = "physid")]
    pub phys_id: String,
    #[serde(rename = "businfo")]
    pub bus_info: String,
    #[serde(rename = "logicalname", deserialize_with = "one_or_many_names")]
    pub logical_name: String,
    pub configuration: DeviceConfiguration,
}

impl Device {
    pub fn link_up(&self) -> bool {
        self.configuration.link == "yes"
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDevice {
    #[serde(flatten)]
    pub device: Device,
    pub size: u64,
    pub capacity: u64,
    pub units: String,
    pub version: String,
}

/// The system memory record plus a tally of its banks. On hosts with
/// several memory arrays `system` is the first array with `size` and
/// `capacity` summed over all of them.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryInfo {
    #[serde(flatten)]
    pub system: MemoryDevice,
    pub arrays: usize,
    pub banks: usize,
    pub populated_banks: usize,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDevice {
    #[serde(flatten)]
    pub device: Device,
    #[serde(skip_deserializing)]
    pub num_vfs: u32,
    #[serde(skip_deserializing)]
    pub max_vfs: u32,
    #[serde(skip_deserializing)]
    pub is_pf: bool,
    #[serde(skip_deserializing)]
    pub devlink_mode: String,
    #[serde(skip_deserializing)]
    pub inline_mode: String,
    #[serde(skip_deserializing)]
    pub encap_mode: String,
}
