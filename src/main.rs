//! CLI entry point for blue-noise point selection

use clap::Parser;
use sample_elimination::io::cli::{Cli, Runner};

fn main() -> sample_elimination::Result<()> {
    let cli = Cli::parse();
    Runner::new(cli).run()
}
