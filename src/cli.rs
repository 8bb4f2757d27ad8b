use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{Domain, LogFormat};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "node-inventory")]
#[command(about = "Collect a hardware and kernel inventory snapshot of this node")]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Seconds to wait for each external tool before giving up on it
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect inventory and emit one structured log event per domain
    Collect {
        /// Domains to collect (defaults to the configured list)
        #[arg(long, value_enum, value_delimiter = ',')]
        only: Vec<Domain>,
    },

    /// Collect inventory and print the records instead of logging them
    #[command(subcommand)]
    Show(ShowCommands),
}

#[derive(Subcommand)]
pub enum ShowCommands {
    /// Kernel identity and kdump state
    Kernel {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// CPU topology from lscpu
    Cpu {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// System memory from lshw
    Memory {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Link-up network interfaces with eswitch and SR-IOV details
    Network {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Everything above in one document
    All {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}
