//! `proza` command-line entry point

use clap::Parser;
use proza_cli::{Cli, CliResult};

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.global.init_logging();
    cli.global.init_threads()?;
    cli.run()
}
