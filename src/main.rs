mod cli;
mod config;
mod convert;
mod exceedance_cmd;
mod heatwave_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Heatwave(args) => heatwave_cmd::run(args),
        Command::Exceedance(args) => exceedance_cmd::run(args),
    }
}
