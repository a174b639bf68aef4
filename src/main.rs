use std::process;

use clap::Parser;

use qtaper::interfaces::cli::{setup_logger, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = setup_logger(cli.output.as_deref(), cli.verbose) {
        eprintln!("Unable to set up logging: {err:#}");
        process::exit(1);
    }
    if cli.execute().is_err() {
        process::exit(1);
    }
}
