use scdl_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("scdl: logging disabled: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("scdl error: {:#}", err);
        std::process::exit(1);
    }
}
