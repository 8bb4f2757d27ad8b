use crate::cli::ShowCommands;
use crate::config::Config;
use crate::hardware::{
    collect_cpu_info,
    collect_full_inventory,
    collect_kernel_info,
    collect_memory_info,
    collect_network_info,
    cpu_report,
    Sources,
};
use crate::output::output_data;

pub fn handle_show_command(config: &Config, cmd: &ShowCommands) -> anyhow::Result<()> {
    let sources = Sources::from_config(config);

    match cmd {
        ShowCommands::Kernel { format } => {
            let kernel_info = collect_kernel_info(&sources);
            output_data(&kernel_info, *format)?;
        }
        ShowCommands::Cpu { format } => {
            let cpu_info = cpu_report(collect_cpu_info(&sources));
            output_data(&cpu_info, *format)?;
        }
        ShowCommands::Memory { format } => {
            let memory_info = collect_memory_info(&sources);
            output_data(&memory_info, *format)?;
        }
        ShowCommands::Network { format } => {
            let network_info = collect_network_info(&sources);
            output_data(&network_info, *format)?;
        }
        ShowCommands::All { format } => {
            let inventory = collect_full_inventory(&sources);
            output_data(&inventory, *format)?;
        }
    }
    Ok(())
}
