use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lsr::app::{run, ListOptions};
use lsr::core::telemetry::logging::init_logging;

/// Small `ls`-style directory lister.
#[derive(Debug, Parser)]
#[command(name = "lsr", version, about)]
struct Cli {
    /// Use the long listing format.
    #[arg(short = 'l')]
    detailed: bool,

    /// Include entries whose names start with `.`.
    #[arg(short = 'a')]
    all: bool,

    /// Directory to list.
    #[arg(default_value = ".")]
    directory: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // The long format is the variant that also prints the block total.
    let options = ListOptions {
        detailed: cli.detailed,
        include_hidden: cli.all,
        show_total: cli.detailed,
    };

    let mut stdout = io::stdout().lock();
    run(&cli.directory, options, &mut stdout)?;
    Ok(())
}
