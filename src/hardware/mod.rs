// Hardware and kernel inventory collection modules
pub mod error;
pub mod source;
pub mod types;
pub mod lscpu;
pub mod lshw;
pub mod uname;
pub mod topology;
pub mod probe;
pub mod collect_kernel;
pub mod collect_cpu;
pub mod collect_memory;
pub mod collect_network;
pub mod collector;

// Re-export main collection functions
pub use collect_kernel::{collect_kernel_info, emit_kernel_info};
pub use collect_cpu::{collect_cpu_info, cpu_report, emit_cpu_report};
pub use collect_memory::{collect_memory_info, emit_memory_info};
pub use collect_network::{collect_network_info, emit_network_device};
pub use collector::{collect_full_inventory, run_collection};
pub use source::Sources;
