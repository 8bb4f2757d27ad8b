use chrono::Utc;
use tracing::info;

use crate::config::Domain;
use crate::hardware;
use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::types::Inventory;

const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn collect_full_inventory<R: CommandRunner>(sources: &Sources<R>) -> Inventory {
    let kernel = hardware::collect_kernel_info(sources);
    let cpu = hardware::cpu_report(hardware::collect_cpu_info(sources));
    let memory = hardware::collect_memory_info(sources);
    let network = hardware::collect_network_info(sources);

    Inventory {
        agent_version: AGENT_VERSION.to_string(),
        collected_at: Utc::now(),
        kernel,
        cpu,
        memory,
        network,
    }
}

/// Collects each domain in order and emits its events. A domain that
/// fails has already logged why and simply emits nothing or defaults.
pub fn run_collection<R: CommandRunner>(sources: &Sources<R>, domains: &[Domain]) {
    info!("Starting collection");

    for domain in domains {
        match domain {
            Domain::Kernel => {
                info!("Collecting kernel information");
                hardware::emit_kernel_info(&hardware::collect_kernel_info(sources));
            }
            Domain::Cpu => {
                info!("Collecting CPU information");
                let report = hardware::cpu_report(hardware::collect_cpu_info(sources));
                hardware::emit_cpu_report(&report);
            }
            Domain::Memory => {
                info!("Collecting memory information");
                if let Some(memory) = hardware::collect_memory_info(sources) {
                    hardware::emit_memory_info(&memory);
                }
            }
            Domain::Network => {
                info!("Collecting NIC information");
                for nic in hardware::collect_network_info(sources) {
                    hardware::emit_network_device(&nic);
                }
            }
        }
    }

    info!("Finished collection");
}
