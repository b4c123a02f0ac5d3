mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use hubtheme::{debug, debug_log};

fn main() -> Result<()> {
    debug::init();

    let cli = Cli::parse();
    debug_log!("command: {:?}", cli.command);

    let config_path = commands::config_path(cli.config.as_deref());
    let load_config = || commands::load_config(cli.config.as_deref());

    match cli.command {
        Commands::Init { force } => commands::run_init(&config_path, force),
        Commands::List { mode } => commands::run_list(&load_config()?, mode),
        Commands::Script { raw, nonce, out } => {
            commands::run_script(&load_config()?, raw, nonce.as_deref(), out.as_deref())
        }
        Commands::Resolve { system } => commands::run_resolve(&load_config()?, system.prefers_dark()),
        Commands::Apply { system } => commands::run_apply(&load_config()?, system.prefers_dark()),
        Commands::Set { id } => commands::run_set(&load_config()?, &id),
        Commands::Toggle { system } => commands::run_toggle(&load_config()?, system.prefers_dark()),
        Commands::Status => commands::run_status(&load_config()?, &config_path),
    }
}
