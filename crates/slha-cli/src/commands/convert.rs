use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use slha_convert::{convert, ConvertOpts, ReorderPolicy};
use tracing::info;

use super::write_json;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// SLHA1 spectrum file.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination of the SLHA2 document.
    #[arg(long)]
    pub out: PathBuf,
    /// Sort whole sectors by mass instead of swapping generation pairs.
    #[arg(long)]
    pub full_mixing: bool,
    /// YAML file with conversion options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Optional JSON file receiving the conversion report.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn load_opts(args: &ConvertArgs) -> Result<ConvertOpts, Box<dyn Error>> {
    let mut opts = match &args.config {
        Some(path) => ConvertOpts::from_yaml_str(&fs::read_to_string(path)?)?,
        None => ConvertOpts::default(),
    };
    if args.full_mixing {
        opts.reorder = ReorderPolicy::FullMixing;
    }
    Ok(opts)
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let opts = load_opts(args)?;
    let input = slha_io::read_file(&args.input)?;
    let conversion = convert(&input, &opts)?;

    if let Some(parent) = args.out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    slha_io::write_file(&args.out, &conversion.document)?;
    if let Some(path) = &args.report {
        write_json(path, &conversion.report)?;
    }

    info!(
        input = %args.input.display(),
        out = %args.out.display(),
        warnings = conversion.report.warnings.len(),
        hash = %conversion.report.output_hash,
        "wrote SLHA2 document"
    );
    Ok(())
}
