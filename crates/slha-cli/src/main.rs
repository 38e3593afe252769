//! `slha-tool`: converts SLHA1 spectra to SLHA2 and maps them onto model
//! parameters.

use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    convert::{self, ConvertArgs},
    inspect::{self, InspectArgs},
    map::{self, MapArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "slha-tool", version, about = "SLHA1 to SLHA2 conversion and model parameter mapping")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv). Without it `RUST_LOG` applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an SLHA1 spectrum file to SLHA2 conventions.
    Convert(ConvertArgs),
    /// Resolve a model's declared parameters from a spectrum file.
    Map(MapArgs),
    /// Summarise the blocks and decays of a spectrum file.
    Inspect(InspectArgs),
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Convert(args) => convert::run(&args),
        Command::Map(args) => map::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}
