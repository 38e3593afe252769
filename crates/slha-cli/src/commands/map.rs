use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use slha_convert::{convert, ConvertOpts};
use slha_model::{map_parameters, ModelSchema};

use super::write_json;

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Spectrum file (SLHA2 unless `--from-slha1` is given).
    #[arg(long)]
    pub input: PathBuf,
    /// Model schema in YAML or JSON.
    #[arg(long)]
    pub model: PathBuf,
    /// Destination of the parameter table; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Convert the input from SLHA1 with default options before mapping.
    #[arg(long)]
    pub from_slha1: bool,
}

pub fn run(args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let schema = ModelSchema::load(&args.model)?;
    let mut document = slha_io::read_file(&args.input)?;
    if args.from_slha1 {
        document = convert(&document, &ConvertOpts::default())?.document;
    }
    let table = map_parameters(&document, &schema)?;
    match &args.out {
        Some(path) => write_json(path, &table)?,
        None => println!("{}", table.to_json()?),
    }
    Ok(())
}
