mod cli;
mod commands;
mod config;
mod hardware;
mod logging;
mod output;

use std::io;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{handle_collect_command, handle_show_command};
use config::Config;
use output::print_error;

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.log.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.command_timeout_secs = timeout;
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{e:#}"));
            std::process::exit(1);
        }
    };

    // Events are the product of `collect`; `show` keeps stdout for its records.
    let dispatch = match &cli.command {
        Commands::Collect { .. } => logging::build_dispatch(&config.log, cli.verbose, cli.quiet, io::stdout),
        Commands::Show(_) => logging::build_dispatch(&config.log, cli.verbose, cli.quiet, io::stderr),
    };

    let result = tracing::dispatcher::with_default(&dispatch, || match &cli.command {
        Commands::Collect { only } => handle_collect_command(&config, only),
        Commands::Show(cmd) => handle_show_command(&config, cmd),
    });

    if let Err(e) = result {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
