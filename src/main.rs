mod cli;
mod error;
mod event;
mod outputs;
mod preview;
mod progress;
mod send;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Send {
            webhook_url,
            event_path,
            config,
            layout,
            policy,
            converter,
            pandoc_url,
            color,
            output_file,
            dry_run,
            verbose,
        } => send::execute(send::SendArgs {
            webhook_url,
            event_path,
            config_path: config,
            layout,
            policy,
            converter,
            pandoc_url,
            color,
            output_file,
            dry_run,
            verbose,
        }),
        Commands::Preview {
            file,
            policy,
            categories,
        } => preview::execute(&file, policy, categories),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
