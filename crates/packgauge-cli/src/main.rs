//! Packgauge - weight and capacity gauge for bags and suitcases
//!
//! A CLI tool that tracks what is packed where and refuses additions that
//! would push a container past its declared limits.

mod cli;
mod commands;
mod logger;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
